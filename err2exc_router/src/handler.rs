//! Installed handler: one router per thread acting as the sole error hook.
//!
//! Code that raises errors calls [`trigger_error`]; the installed router
//! decides what happens. The router and its last-error slot are
//! thread-local, so every thread is its own execution context.
//!
//! A signal raised while the installed router is already handling one on
//! the same thread (for example from inside a sink) cannot re-enter it and
//! takes the built-in path instead: logged through `tracing`, continued.
//!
//! Both paths write the same per-thread last-error slot, so
//! [`error_get_last`] returns the re-entrant signal's record as well.

use std::cell::RefCell;
use std::process;

use err2exc_common::config::RuntimeConfig;
use err2exc_common::exception::ErrorException;
use err2exc_common::format::{DEFAULT_RUNTIME_LABEL, format_error_line};
use err2exc_common::kind::Severity;
use tracing::{debug, error, info, warn};

use crate::last_error::LastError;
use crate::router::{Disposition, ErrorRouter};
use crate::signal::ErrorSignal;
use crate::sink::{DiagnosticsSink, TracingSink};

/// Router type held by the hook.
pub type InstalledRouter = ErrorRouter<Box<dyn DiagnosticsSink>, RuntimeConfig>;

type ShutdownHook = Box<dyn FnOnce()>;

thread_local! {
    static HANDLER: RefCell<Option<InstalledRouter>> = const { RefCell::new(None) };
    static LAST: RefCell<Option<LastError>> = const { RefCell::new(None) };
    static SHUTDOWN_HOOKS: RefCell<Vec<ShutdownHook>> = const { RefCell::new(Vec::new()) };
}

/// Install a default router, or reset the policy of the installed one.
///
/// Safe to call any number of times.
pub fn init() {
    HANDLER.with(|slot| {
        let mut slot = slot.borrow_mut();
        match slot.as_mut() {
            Some(router) => {
                router.reset();
                debug!("error handler policy reset");
            }
            None => {
                let sink: Box<dyn DiagnosticsSink> = Box::new(TracingSink::new());
                *slot = Some(ErrorRouter::new(sink, RuntimeConfig::default()));
                debug!("default error handler installed");
            }
        }
    });
}

/// Install `router`, returning the one it replaces.
pub fn init_with(router: InstalledRouter) -> Option<InstalledRouter> {
    HANDLER.with(|slot| slot.borrow_mut().replace(router))
}

/// Uninstall and return the current router.
pub fn restore() -> Option<InstalledRouter> {
    HANDLER.with(|slot| slot.borrow_mut().take())
}

/// True when a router is installed on this thread.
pub fn is_installed() -> bool {
    HANDLER.with(|slot| slot.borrow().is_some())
}

/// Run a closure against the installed router.
///
/// Returns `None` when nothing is installed or the router is busy.
pub fn with_router<R>(f: impl FnOnce(&mut InstalledRouter) -> R) -> Option<R> {
    HANDLER.with(|slot| {
        let mut slot = slot.try_borrow_mut().ok()?;
        slot.as_mut().map(f)
    })
}

/// Route a signal without acting on the outcome.
pub fn dispatch(signal: ErrorSignal) -> Disposition {
    let signal = match HANDLER.with(|slot| route_installed(slot, signal)) {
        Ok(disposition) => return disposition,
        Err(signal) => signal,
    };
    builtin(signal)
}

fn route_installed(
    slot: &RefCell<Option<InstalledRouter>>,
    signal: ErrorSignal,
) -> Result<Disposition, ErrorSignal> {
    let Ok(mut slot) = slot.try_borrow_mut() else {
        return Err(signal);
    };
    let Some(router) = slot.as_mut() else {
        return Err(signal);
    };
    let disposition = router.handle(signal);
    set_last(router.last_error().cloned());
    Ok(disposition)
}

fn set_last(record: Option<LastError>) {
    LAST.with(|last| *last.borrow_mut() = record);
}

fn builtin(signal: ErrorSignal) -> Disposition {
    let line = format_error_line(
        DEFAULT_RUNTIME_LABEL,
        signal.kind,
        &signal.message,
        &signal.location,
    );
    match signal.kind.severity() {
        Severity::Fatal => error!("{line}"),
        Severity::Warning => warn!("{line}"),
        Severity::Notice => info!("{line}"),
    }
    set_last(Some(LastError::from_signal(signal)));
    Disposition::Continue
}

/// Raise an error signal.
///
/// `Continue` returns `Ok`, `Raise` returns the exception, `Terminate`
/// runs the shutdown hooks and exits the process.
pub fn trigger_error(signal: ErrorSignal) -> Result<(), ErrorException> {
    match dispatch(signal) {
        Disposition::Continue => Ok(()),
        Disposition::Raise(exception) => Err(exception),
        Disposition::Terminate(code) => terminate(code),
    }
}

/// Queue a hook to run before a terminating exit.
pub fn register_shutdown(hook: impl FnOnce() + 'static) {
    SHUTDOWN_HOOKS.with(|hooks| hooks.borrow_mut().push(Box::new(hook)));
}

/// Run queued shutdown hooks in registration order. Returns how many ran.
pub fn run_shutdown_hooks() -> usize {
    let hooks = SHUTDOWN_HOOKS.with(|hooks| std::mem::take(&mut *hooks.borrow_mut()));
    let count = hooks.len();
    for hook in hooks {
        hook();
    }
    count
}

/// Run shutdown hooks, then exit with `code`.
pub fn terminate(code: i32) -> ! {
    let ran = run_shutdown_hooks();
    info!(code, hooks = ran, "terminating on error signal");
    process::exit(code)
}

/// Last error observed on this thread, from either path.
pub fn error_get_last() -> Option<LastError> {
    LAST.with(|last| last.borrow().clone())
}

/// Clear this thread's last-error record.
pub fn clear_last_error() {
    with_router(|router| router.clear_last_error());
    set_last(None);
}

/// Stuff an exception into this thread's last-error record.
pub fn record_exception(exception: &ErrorException) {
    with_router(|router| router.record_exception(exception));
    set_last(Some(LastError::from_exception(exception)));
}
