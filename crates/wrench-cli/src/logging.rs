//! Diagnostic logging setup
//!
//! Logs and diagnostics go to stderr so stdout stays free for the rendered
//! declaration preview.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const LEVELS: [LevelFilter; 6] = [
    LevelFilter::OFF,
    LevelFilter::ERROR,
    LevelFilter::WARN,
    LevelFilter::INFO,
    LevelFilter::DEBUG,
    LevelFilter::TRACE,
];

/// Initialize the global subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` adjusted by the `-v`/`-q`
/// counts is used.
pub fn init(level: &str, verbose: u8, quiet: u8) {
    let level = resolve_level(level, verbose, quiet);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into()));

    // Ignore error if a subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

/// Base level shifted up by `verbose` steps and down by `quiet` steps
pub fn resolve_level(level: &str, verbose: u8, quiet: u8) -> LevelFilter {
    let base = level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);
    let index = LEVELS.iter().position(|l| *l == base).unwrap_or(3) as i32;
    let shifted = (index + i32::from(verbose) - i32::from(quiet)).clamp(0, LEVELS.len() as i32 - 1);
    LEVELS[shifted as usize]
}
