//! Logging adapter: forwards the domain `OperationLogger` port and
//! `set_log_fn` callback to `tracing`.
//!
//! Single entry point for all application logging via the domain port;
//! `tracing` remains an infrastructure implementation detail the domain
//! layer never depends on directly. Register at startup with
//! `photolib_domain::infra::logging::set_log_fn(tracing_log_fn)`.

use std::path::Path;

use photolib_domain::ports::infrastructure::logging::{LogLevel, OperationLogger};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

/// Log function suitable for `photolib_domain::infra::logging::set_log_fn`.
/// Forwards level, context, message and optional detail to `tracing::event!`.
pub fn tracing_log_fn(level: LogLevel, context: &str, message: &str, detail: Option<&dyn std::fmt::Display>) {
    macro_rules! emit {
        ($lvl:expr) => {
            if let Some(d) = detail {
                tracing::event!($lvl, context = %context, detail = %d, "{}", message);
            } else {
                tracing::event!($lvl, context = %context, "{}", message);
            }
        };
    }
    match level {
        LogLevel::Error => emit!(tracing::Level::ERROR),
        LogLevel::Warn => emit!(tracing::Level::WARN),
        LogLevel::Info => emit!(tracing::Level::INFO),
        LogLevel::Debug => emit!(tracing::Level::DEBUG),
        LogLevel::Trace => emit!(tracing::Level::TRACE),
    }
}

// ── CLI stderr logging ──────────────────────────────────────────────────

use std::sync::atomic::{AtomicU8, Ordering};

/// Global minimum log level for `stderr_log_fn` (0=Error..4=Trace).
static STDERR_LOG_LEVEL: AtomicU8 = AtomicU8::new(2); // default = Info

/// Set the minimum log level for stderr output.
pub fn set_stderr_log_level(level: LogLevel) {
    let n = match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
        LogLevel::Trace => 4,
    };
    STDERR_LOG_LEVEL.store(n, Ordering::Relaxed);
}

fn level_to_u8(level: &LogLevel) -> u8 {
    match level {
        LogLevel::Error => 0,
        LogLevel::Warn => 1,
        LogLevel::Info => 2,
        LogLevel::Debug => 3,
        LogLevel::Trace => 4,
    }
}

/// CLI-friendly log function that writes to stderr with level filtering.
///
/// Respects the global level set by [`set_stderr_log_level`].
pub fn stderr_log_fn(level: LogLevel, context: &str, message: &str, detail: Option<&dyn std::fmt::Display>) {
    let threshold = STDERR_LOG_LEVEL.load(Ordering::Relaxed);
    if level_to_u8(&level) > threshold {
        return;
    }
    let tag = match level {
        LogLevel::Error => "ERROR",
        LogLevel::Warn => " WARN",
        LogLevel::Info => " INFO",
        LogLevel::Debug => "DEBUG",
        LogLevel::Trace => "TRACE",
    };
    if let Some(d) = detail {
        eprintln!("[{tag}] {context}: {message} ({d})");
    } else {
        eprintln!("[{tag}] {context}: {message}");
    }
}

/// Adapter that implements domain `OperationLogger` by forwarding to tracing.
/// Can be registered in DI when an `Arc<dyn OperationLogger>` is required.
#[derive(Debug)]
pub struct TracingOperationLogger;

impl TracingOperationLogger {
    /// Creates a new tracing-backed operation logger.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingOperationLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationLogger for TracingOperationLogger {
    fn log(&self, level: LogLevel, context: &str, message: &str, detail: Option<&dyn std::fmt::Display>) {
        tracing_log_fn(level, context, message, detail);
    }
}

/// Guard returned by [`init_logging`]; dropping it flushes the non-blocking
/// file appender. Must be held for the lifetime of the process.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

/// Installs a `tracing-subscriber` pipeline (stderr + optional rolling file)
/// filtered by `directive`, and registers [`tracing_log_fn`] as the domain
/// logging facade's sink.
///
/// # Errors
///
/// Returns [`photolib_domain::error::Error::misconfigured`] if `directive`
/// is not a valid `EnvFilter` expression, or if installing the global
/// subscriber fails (e.g. it was already installed).
pub fn init_logging(directive: &str, file_dir: Option<&Path>) -> photolib_domain::error::Result<LoggingGuard> {
    let filter = EnvFilter::try_new(directive)
        .map_err(|e| photolib_domain::error::Error::misconfigured(format!("invalid log filter {directive:?}: {e}")))?;

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true);

    let (file_layer, file_guard) = match file_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "photolib.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer().with_writer(non_blocking).json().with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    Registry::default()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| photolib_domain::error::Error::misconfigured(format!("logging already initialized: {e}")))?;

    photolib_domain::infra::logging::set_log_fn(tracing_log_fn);

    Ok(LoggingGuard { _file_guard: file_guard })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_level_filtering_respects_threshold() {
        set_stderr_log_level(LogLevel::Warn);
        assert_eq!(level_to_u8(&LogLevel::Error), 0);
        assert!(level_to_u8(&LogLevel::Error) <= STDERR_LOG_LEVEL.load(Ordering::Relaxed));
        set_stderr_log_level(LogLevel::Info);
    }
}
