//! Integration test: what reaches the sink, with configuration from TOML.
//!
//! Validates the recording gates end to end:
//! 1. Reporting mask filters both channels
//! 2. Rethrown kinds skip the log channel unless `log_rethrown`
//! 3. Display is independent of the rethrow rule and decorated
//! 4. Terminating kinds produce exactly one log line

use err2exc_common::config::{ConfigLoader, Err2ExcConfig};
use err2exc_common::kind::ErrorKind;
use std::fs;
use tempfile::TempDir;

use err2exc_router::policy::RoutingPolicy;
use err2exc_router::sink::{DisplayTarget, MemorySink};
use err2exc_router::{Disposition, ErrorRouter, ErrorSignal};

// ── Helpers ─────────────────────────────────────────────────────────

fn router_from_toml(toml: &str) -> ErrorRouter<MemorySink> {
    let config = Err2ExcConfig::from_toml(toml).unwrap();
    config.validate().unwrap();
    ErrorRouter::with_policy(
        RoutingPolicy::from(config.policy),
        MemorySink::new(),
        config.runtime,
    )
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn rethrown_user_warning_displays_but_does_not_log() {
    let mut r = router_from_toml(
        r#"
[runtime]
error_reporting = "ALL"
log_errors = true
display_errors = "stdout"

[policy]
rethrow = "USER_WARNING"
log_rethrown = false
"#,
    );

    let d = r.handle(ErrorSignal::new(ErrorKind::USER_WARNING, "low disk").at("df.php", 11));

    assert!(matches!(d, Disposition::Raise(_)));
    assert!(r.sink().logs().is_empty());
    assert_eq!(r.sink().displays().len(), 1);
    assert_eq!(
        r.sink().displays()[0],
        (
            DisplayTarget::Stdout,
            "PHP User Warning: low disk in df.php on line 11".to_string()
        )
    );
}

#[test]
fn terminating_user_error_logs_exactly_one_line() {
    let mut r = router_from_toml(
        r#"
[runtime]
error_reporting = "USER_ERROR"
log_errors = true
runtime_label = ""

[policy]
terminate = "USER_ERROR"
"#,
    );

    let d = r.handle(ErrorSignal::new(ErrorKind::USER_ERROR, "quota exceeded").at("q.php", 30));

    assert_eq!(d, Disposition::Terminate(1));
    assert_eq!(
        r.sink().log_lines(),
        vec!["User Error: quota exceeded in q.php on line 30"]
    );
    assert!(r.sink().displays().is_empty());
}

#[test]
fn log_rethrown_adds_log_line() {
    let mut r = router_from_toml(
        r#"
[policy]
log_rethrown = true
"#,
    );

    r.handle(ErrorSignal::new(ErrorKind::WARNING, "w").at("w.php", 1));
    assert_eq!(r.sink().log_lines(), vec!["PHP Warning: w in w.php on line 1"]);
}

#[test]
fn unreported_kind_still_routes_and_updates_last_error() {
    let mut r = router_from_toml(
        r#"
[runtime]
error_reporting = "ERROR"
display_errors = "stderr"
"#,
    );

    let d = r.handle(ErrorSignal::new(ErrorKind::USER_ERROR, "silent"));

    assert_eq!(d, Disposition::Terminate(1));
    assert!(r.sink().logs().is_empty());
    assert!(r.sink().displays().is_empty());
    assert_eq!(r.last_error().unwrap().message, "silent");
}

#[test]
fn display_decoration_on_stderr() {
    let mut r = router_from_toml(
        r#"
[runtime]
display_errors = "stderr"
error_prepend_string = ">> "
error_append_string = " <<"
"#,
    );

    r.handle(ErrorSignal::new(ErrorKind::DEPRECATED, "odd").at("o.php", 2));

    assert_eq!(
        r.sink().displays(),
        &[(
            DisplayTarget::Stderr,
            ">> PHP Unknown Error: odd in o.php on line 2 <<".to_string()
        )]
    );
    assert_eq!(
        r.sink().log_lines(),
        vec!["PHP Unknown Error: odd in o.php on line 2"]
    );
}

#[test]
fn logging_disabled_display_off_records_nothing() {
    let mut r = router_from_toml(
        r#"
[runtime]
log_errors = false
display_errors = "off"
"#,
    );

    let rec = r.record(&ErrorSignal::new(ErrorKind::USER_ERROR, "e"));
    assert!(rec.eligible);
    assert!(!rec.logged);
    assert!(!rec.displayed);
}

#[test]
fn router_from_config_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("err2exc.toml");
    fs::write(
        &path,
        r#"
[runtime]
display_errors = "stdout"
runtime_label = "APP"

[policy]
rethrow = "NOTICE"
terminate = "WARNING"
"#,
    )
    .unwrap();

    let config = Err2ExcConfig::load(&path).unwrap();
    let mut r = ErrorRouter::with_policy(
        RoutingPolicy::from(config.policy),
        MemorySink::new(),
        config.runtime,
    );

    assert!(matches!(
        r.handle(ErrorSignal::new(ErrorKind::NOTICE, "n")),
        Disposition::Raise(_)
    ));
    assert_eq!(
        r.handle(ErrorSignal::new(ErrorKind::WARNING, "w").at("w.php", 9)),
        Disposition::Terminate(1)
    );
    assert_eq!(r.sink().log_lines(), vec!["APP Warning: w in w.php on line 9"]);
    assert_eq!(r.sink().displays().len(), 2);
}
