//! Logging
//!
//! The processor reports through a [`Logger`] collaborator handed in at
//! construction. [`TracingLogger`] forwards everything to `tracing`.

use std::error::Error;

use tracing_subscriber::{fmt, EnvFilter};

/// Logger collaborator used by the command processor.
///
/// Implementations must never panic.
pub trait Logger: Send + Sync {
    /// Record an informational message
    fn write_info_message(&self, message: &str);

    /// Record an error that was caught and absorbed
    fn write_exception(&self, error: &dyn Error);
}

/// Default logger: emits `tracing` events under the `memcmd` target
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn write_info_message(&self, message: &str) {
        tracing::info!(target: "memcmd", "{}", message);
    }

    fn write_exception(&self, error: &dyn Error) {
        match error.source() {
            Some(source) => tracing::error!(target: "memcmd", "{} (caused by: {})", error, source),
            None => tracing::error!(target: "memcmd", "{}", error),
        }
    }
}

/// Install a `fmt` subscriber honouring `RUST_LOG`.
///
/// Falls back to `info,memcmd=debug`. Safe to call more than once; later
/// calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,memcmd=debug"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .try_init();
}
