//! Log setup for the `blocktint` binary
//!
//! Stdout carries decorations, so the console layer writes to stderr and
//! stays at `warn` unless `RUST_LOG` says otherwise. Useful filters:
//!
//! - `RUST_LOG=blocktint=debug` shows one summary line per file
//! - `RUST_LOG=blocktint::dispatch=trace` shows every decorated node
//!
//! A second layer appends everything at `debug` to
//! `<config dir>/blocktint/logs/blocktint.log`, rotated daily.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE: &str = "blocktint.log";
const CONSOLE_DEFAULT: &str = "warn";
const FILE_LEVEL: &str = "debug";

pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(CONSOLE_DEFAULT));
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(console_filter);

    // File logging is optional
    let file = crate::config_paths::ensure_logs_dir()
        .map_err(|e| eprintln!("blocktint: file logging disabled: {}", e))
        .ok()
        .map(|dir| {
            fmt::layer()
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE))
                .with_ansi(false)
                .with_line_number(true)
                .with_filter(EnvFilter::new(FILE_LEVEL))
        });

    tracing_subscriber::registry().with(console).with(file).init();
}
