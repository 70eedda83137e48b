use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Installs the global tracing subscriber.
///
/// Logs always go to stderr so stdout stays clean for report output. When
/// `settings.directory` is set, a daily-rolling file is written as well; the
/// returned guard must be held until exit so buffered lines are flushed.
pub fn init_logging(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_ansi(false).with_writer(writer);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;

            tracing::debug!(directory = %directory.display(), "File logging enabled");
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .try_init()
                .map_err(|e| ConfigError::LoggingError(e.to_string()))?;
            Ok(None)
        }
    }
}
