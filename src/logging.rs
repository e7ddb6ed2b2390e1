//! Diagnostic logging via the `log` facade and `env_logger`.
//!
//! Diagnostics go to stderr so they never interleave with the prompt
//! protocol on stdout. The level is chosen by, in order:
//!
//! 1. `RUST_LOG`, if set
//! 2. `--quiet` (errors only)
//! 3. `-v` count: warn, info, debug, trace
//!
//! Debug builds prefix each record with a timestamp and, from `-vv` on, the
//! module path. Release builds print level and message only.
//!
//! ```rust,no_run
//! use dupes::logging::init_logging;
//!
//! init_logging(1, false);
//! log::info!("scanning");
//! ```

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Install the global logger.
///
/// Calling it again is harmless: later calls are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let from_env = env::var_os("RUST_LOG").is_some();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);
    if from_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }
    configure_format(&mut builder, verbose);

    if builder.try_init().is_err() {
        return;
    }
    log::debug!(
        "Logging initialized at {}{}",
        current_level_name(),
        if from_env { " (RUST_LOG)" } else { "" }
    );
}

fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn configure_format(builder: &mut Builder, verbose: u8) {
    #[cfg(debug_assertions)]
    {
        builder.format(move |buf, record| {
            let level = record.level();
            let style = buf.default_level_style(level);
            let timestamp = buf.timestamp_seconds();
            if verbose >= 2 {
                writeln!(
                    buf,
                    "{timestamp} {style}{:<5}{style:#} [{}] {}",
                    level,
                    record.module_path().unwrap_or("dupes"),
                    record.args()
                )
            } else {
                writeln!(buf, "{timestamp} {style}{:<5}{style:#} {}", level, record.args())
            }
        });
    }

    #[cfg(not(debug_assertions))]
    {
        let _ = verbose;
        builder.format(|buf, record| {
            let level = record.level();
            let style = buf.default_level_style(level);
            writeln!(buf, "{style}{:<5}{style:#} {}", level, record.args())
        });
    }
}

/// Name of the currently active maximum level.
pub fn current_level_name() -> &'static str {
    match log::max_level() {
        LevelFilter::Off => "off",
        LevelFilter::Error => "error",
        LevelFilter::Warn => "warn",
        LevelFilter::Info => "info",
        LevelFilter::Debug => "debug",
        LevelFilter::Trace => "trace",
    }
}
