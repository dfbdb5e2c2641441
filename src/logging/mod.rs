//! Structured logging for the viewer
//!
//! Sets up the `tracing` subscriber (console plus optional JSON files), keeps
//! a per-thread session id for correlating a viewing session, and collects
//! frame timing statistics.

pub mod config;
pub mod metrics;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;

pub use config::LoggingConfig;
pub use metrics::FrameStats;

thread_local! {
    static SESSION_ID: std::cell::RefCell<Option<Uuid>> = const { std::cell::RefCell::new(None) };
}

/// Initialize the logging system with the provided configuration.
///
/// The returned guard flushes the file writer when dropped; keep it alive for
/// the lifetime of the program.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let crate_name = env!("CARGO_PKG_NAME").replace('-', "_");
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives(&crate_name)));

    let mut layers = Vec::new();
    let mut guard = None;

    if config.console_output {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_line_number(config.include_file_location)
            .with_file(config.include_file_location);
        layers.push(console_layer.boxed());
    }

    if let Some(ref log_dir) = config.log_directory {
        let file_appender = tracing_appender::rolling::daily(log_dir, "viewer.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .json();
        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::debug!(?config, "Logging initialized");
    Ok(guard)
}

/// Set the session id for the current thread
pub fn set_session_id(id: Uuid) {
    SESSION_ID.with(|session_id| {
        *session_id.borrow_mut() = Some(id);
    });
}

/// Get the session id of the current thread
pub fn get_session_id() -> Option<Uuid> {
    SESSION_ID.with(|session_id| *session_id.borrow())
}

/// Generate a new session id and set it for the current thread
pub fn new_session_id() -> Uuid {
    let id = Uuid::new_v4();
    set_session_id(id);
    id
}

pub fn clear_session_id() {
    SESSION_ID.with(|session_id| {
        *session_id.borrow_mut() = None;
    });
}
