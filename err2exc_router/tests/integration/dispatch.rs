//! Integration test: disposition for every kind under several policies.
//!
//! 1. Kinds in the rethrow mask → Raise carrying message, kind, location
//! 2. Kinds only in the terminate mask → Terminate(1)
//! 3. Everything else → Continue
//! 4. Last-error slot tracks every signal regardless of outcome

use err2exc_common::config::RuntimeConfig;
use err2exc_common::kind::ErrorKind;
use err2exc_common::location::Location;

use err2exc_router::policy::RoutingPolicy;
use err2exc_router::sink::MemorySink;
use err2exc_router::{Disposition, ErrorRouter, ErrorSignal};

// ── Helpers ─────────────────────────────────────────────────────────

/// Every named single-bit kind plus one unknown code.
fn all_kinds() -> Vec<ErrorKind> {
    let mut kinds: Vec<ErrorKind> = ErrorKind::ALL
        .iter()
        .filter(|k| k.bits().count_ones() == 1)
        .collect();
    kinds.push(ErrorKind::from_code(0x8000));
    kinds
}

fn policies() -> Vec<RoutingPolicy> {
    vec![
        RoutingPolicy::default(),
        RoutingPolicy {
            rethrow: ErrorKind::USER_ERROR | ErrorKind::NOTICE,
            terminate: ErrorKind::USER_ERROR | ErrorKind::WARNING,
            log_rethrown: false,
        },
        RoutingPolicy {
            rethrow: ErrorKind::empty(),
            terminate: ErrorKind::ALL,
            log_rethrown: true,
        },
        RoutingPolicy {
            rethrow: ErrorKind::ALL,
            terminate: ErrorKind::ALL,
            log_rethrown: false,
        },
    ]
}

fn router(policy: RoutingPolicy) -> ErrorRouter<MemorySink> {
    ErrorRouter::with_policy(policy, MemorySink::new(), RuntimeConfig::default())
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn disposition_follows_masks_for_every_kind() {
    for policy in policies() {
        let mut r = router(policy);
        for kind in all_kinds() {
            let loc = Location::new("route.php", kind.code());
            let d = r.handle(ErrorSignal::new(kind, "msg").with_location(loc.clone()));

            if kind.intersects(policy.rethrow) {
                let exc = d.exception().unwrap_or_else(|| panic!("{kind:?} should raise"));
                assert_eq!(exc.message, "msg");
                assert_eq!(exc.code, kind.code());
                assert_eq!(exc.severity, kind);
                assert_eq!(exc.location, loc);
            } else if kind.intersects(policy.terminate) {
                assert_eq!(d, Disposition::Terminate(1), "{kind:?}");
            } else {
                assert_eq!(d, Disposition::Continue, "{kind:?}");
            }

            let last = r.last_error().unwrap();
            assert_eq!(last.kind, kind);
            assert_eq!(last.location, loc);
            assert!(!last.was_exception);
        }
    }
}

#[test]
fn kind_in_both_masks_is_rethrown() {
    let mut r = router(RoutingPolicy {
        rethrow: ErrorKind::USER_ERROR,
        terminate: ErrorKind::USER_ERROR,
        log_rethrown: false,
    });
    let d = r.handle(ErrorSignal::new(ErrorKind::USER_ERROR, "both").at("b.php", 1));
    assert!(matches!(d, Disposition::Raise(_)));
}

#[test]
fn default_policy_outcomes() {
    let mut r = router(RoutingPolicy::default());

    assert!(matches!(
        r.handle(ErrorSignal::new(ErrorKind::WARNING, "w")),
        Disposition::Raise(_)
    ));
    assert!(matches!(
        r.handle(ErrorSignal::new(ErrorKind::USER_WARNING, "uw")),
        Disposition::Raise(_)
    ));
    assert!(matches!(
        r.handle(ErrorSignal::new(ErrorKind::RECOVERABLE_ERROR, "re")),
        Disposition::Raise(_)
    ));
    assert_eq!(
        r.handle(ErrorSignal::new(ErrorKind::USER_ERROR, "ue")),
        Disposition::Terminate(1)
    );
    assert_eq!(
        r.handle(ErrorSignal::new(ErrorKind::USER_NOTICE, "un")),
        Disposition::Continue
    );
}

#[test]
fn reconfigured_then_reset() {
    let mut r = router(RoutingPolicy::default());
    r.policy_mut().rethrow = ErrorKind::empty();
    assert_eq!(
        r.handle(ErrorSignal::new(ErrorKind::WARNING, "w")),
        Disposition::Continue
    );

    r.reset();
    assert!(matches!(
        r.handle(ErrorSignal::new(ErrorKind::WARNING, "w")),
        Disposition::Raise(_)
    ));
}
