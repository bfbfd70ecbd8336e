// crates/observability/src/lib.rs
//! Logging setup and detached-task supervision for the pick/ban relay.
//!
//! Two sinks share one registry:
//! - compact human-readable output on stderr;
//! - optional daily-rolling JSON files (`pickban-relay.log.YYYY-MM-DD`)
//!   written through a non-blocking `tracing-appender` worker.

use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;

use tokio::task::JoinHandle;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "warn,pickban_server=info,pickban_core=info";
const DEBUG_FILTER: &str = "info,pickban_server=debug,pickban_core=debug";
const LOG_FILE_PREFIX: &str = "pickban-relay.log";

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Raise the default filter to debug for our crates.
    pub debug: bool,
    /// Directory for rolling JSON logs. None = stderr only.
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    fn default_directives(&self) -> &'static str {
        if self.debug {
            DEBUG_FILTER
        } else {
            DEFAULT_FILTER
        }
    }
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when file logging is on; keep it alive for
/// the life of the process or buffered lines are lost on exit. Calling this
/// twice is a no-op for the second call.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directives()));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    guard
}

/// Spawn a fire-and-forget task whose failure is logged instead of dropped.
///
/// The caller never awaits the outcome; the returned handle exists for
/// shutdown and tests.
pub fn spawn_detached<F, T, E>(name: &'static str, fut: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Display + Send + 'static,
{
    tokio::spawn(async move {
        match fut.await {
            Ok(_) => tracing::debug!(task = name, "detached task finished"),
            Err(e) => tracing::warn!(task = name, error = %e, "detached task failed"),
        }
    })
}
