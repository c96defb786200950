// ============================================================================
// vsumm-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: env_logger Backend for the log Facade
//
// vsumm-core logs through the `log` macros only; the CLI installs the
// env_logger backend once at startup. Log lines go to stderr so that JSON
// written to stdout stays machine-readable.
//
// USAGE:
// - default: info
// - --verbose: debug (per-round greedy decisions, lazy refreshes)
// - RUST_LOG=trace: every streaming decision; RUST_LOG always wins
//
// AI-ASSISTANT-INFO: Logger initialization and timestamp helpers

use console::style;
use log::{LevelFilter, debug};
use std::io::Write;

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Level used when RUST_LOG is not set.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose { LevelFilter::Debug } else { LevelFilter::Info }
}

/// Installs the global logger. Safe to call more than once; later calls are
/// ignored.
pub fn init(verbose: bool) {
    let level = default_level(verbose);
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(buf, "[{} {}] {}", get_timestamp(), level, record.args())
        })
        .try_init();

    if result.is_ok() {
        debug!("Logger initialized with level: {}", level);
    }
}
