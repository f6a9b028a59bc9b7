//! Logging initialization
//!
//! Sets up `tracing` with an env-filtered stderr layer plus a daily
//! rolling file under `logs/`. The returned guard must be held for the
//! lifetime of the process so buffered file output is flushed.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber
pub fn init_logging() -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily("logs", "chat-gateway.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}
