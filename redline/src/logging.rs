//! Tracing subscriber setup.
//!
//! The TUI owns the terminal, so events go to a log file when one is configured
//! and are discarded otherwise. The level comes from `REDLINE_LOG` (same syntax
//! as `RUST_LOG`), default `warn`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "REDLINE_LOG";

pub fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .compact();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}
