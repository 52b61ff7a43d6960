//! # err2exc
//!
//! Routes one error signal through a configured router and exits the way a
//! host process would:
//!
//! - `Continue` → exit 0
//! - `Terminate` → shutdown hooks, then exit 1
//! - `Raise` → reported as an uncaught exception, shutdown hooks, then exit 255
//!
//! Configuration comes from an optional TOML file (`--config`); without one
//! every setting takes its default.

use clap::Parser;
use err2exc_common::config::{ConfigLoader, Err2ExcConfig};
use err2exc_common::kind::ErrorKind;
use err2exc_router::handler::{register_shutdown, terminate};
use err2exc_router::policy::RoutingPolicy;
use err2exc_router::sink::TracingSink;
use err2exc_router::{Disposition, ErrorRouter, ErrorSignal};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status for an exception nobody caught.
const UNCAUGHT_EXIT_CODE: i32 = 255;

/// Exit status for bad arguments or configuration.
const USAGE_EXIT_CODE: i32 = 2;

/// err2exc — route a legacy error signal
#[derive(Parser, Debug)]
#[command(name = "err2exc")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Route a legacy error signal to an exception, termination or continuation")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Error kind: name (E_USER_ERROR, user-warning), code (256, 0x100) or `A | B`.
    #[arg(long)]
    kind: String,

    /// Diagnostic message.
    #[arg(long)]
    message: String,

    /// Originating file.
    #[arg(long)]
    file: Option<String>,

    /// Originating line.
    #[arg(long)]
    line: Option<u32>,

    /// In-scope bindings as a JSON object.
    #[arg(long, value_name = "JSON")]
    context_json: Option<String>,

    /// Log rethrown kinds too.
    #[arg(long)]
    log_rethrown: bool,

    /// Print the last-error record as JSON after routing.
    #[arg(long)]
    print_last: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            setup_tracing(&args, Level::INFO);
            error!("FATAL: {e}");
            process::exit(USAGE_EXIT_CODE);
        }
    };
    setup_tracing(&args, config.shared.log_level.as_tracing());
    debug!(service = %config.shared.service_name, "err2exc v{} starting", env!("CARGO_PKG_VERSION"));

    register_shutdown(|| {
        if let Err(e) = std::io::stdout().flush() {
            warn!("failed to flush stdout on shutdown: {e}");
        }
    });

    match run(&args, config) {
        Ok(Disposition::Continue) => {
            info!("signal handled, continuing");
        }
        Ok(Disposition::Raise(exception)) => {
            error!(
                code = exception.code,
                "Uncaught ErrorException: {} in {} on line {}",
                exception.message,
                exception.location.file_or_unknown(),
                exception.location.line_or_zero()
            );
            terminate(UNCAUGHT_EXIT_CODE);
        }
        Ok(Disposition::Terminate(code)) => terminate(code),
        Err(e) => {
            error!("FATAL: {e}");
            process::exit(USAGE_EXIT_CODE);
        }
    }
}

fn load_config(args: &Args) -> Result<Err2ExcConfig, Box<dyn std::error::Error>> {
    let config = match args.config {
        Some(ref path) => Err2ExcConfig::load(path)?,
        None => Err2ExcConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: Err2ExcConfig) -> Result<Disposition, Box<dyn std::error::Error>> {
    let kind = ErrorKind::parse(&args.kind)?;

    let mut signal = ErrorSignal::new(kind, args.message.as_str());
    signal.location.file = args.file.clone();
    signal.location.line = args.line;
    if let Some(ref json) = args.context_json {
        let bindings: BTreeMap<String, Value> = serde_json::from_str(json)?;
        signal = signal.with_context(bindings);
    }

    let mut policy = RoutingPolicy::from(config.policy);
    policy.log_rethrown |= args.log_rethrown;

    let mut router = ErrorRouter::with_policy(policy, TracingSink::new(), config.runtime);
    let disposition = router.handle(signal);

    if args.print_last {
        println!("{}", serde_json::to_string_pretty(&router.last_error())?);
    }

    Ok(disposition)
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args, configured: Level) {
    let level = if args.verbose { Level::DEBUG } else { configured };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
