use std::path::PathBuf;

use anyhow::{Context as _, Result};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle, WriteMode};
use log::error;
use serde::{Deserialize, Serialize};

use super::store::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// flexi_logger specification, e.g. `warn,chat_router=debug`.
    #[serde(default = "default_spec")]
    pub spec: String,

    /// Log file directory. Defaults to `logs` in the data directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Echo info and above to stderr in addition to the log file.
    #[serde(default = "default_echo_to_stderr")]
    pub echo_to_stderr: bool,
}

fn default_spec() -> String {
    "warn,chat_router=debug".into()
}

fn default_echo_to_stderr() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            spec: default_spec(),
            directory: None,
            echo_to_stderr: default_echo_to_stderr(),
        }
    }
}

impl LoggingConfig {
    pub fn effective_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| data_dir().join("logs"))
    }

    fn duplicate(&self) -> Duplicate {
        if self.echo_to_stderr {
            Duplicate::Info
        } else {
            Duplicate::None
        }
    }
}

pub fn init(config: &LoggingConfig) -> Result<LoggerHandle> {
    let logger = Logger::try_with_str(&config.spec)
        .with_context(|| format!("Invalid log specification {:?}", config.spec))?
        .log_to_file(FileSpec::default().directory(config.effective_directory()))
        .write_mode(WriteMode::BufferAndFlush)
        .duplicate_to_stderr(config.duplicate())
        .start()
        .context("Cannot start logger")?;
    flush_on_panic(logger.clone());
    Ok(logger)
}

/// Buffered log lines would be lost when a route panics.
fn flush_on_panic(logger: LoggerHandle) {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        error!("Panic: {panic_info}");
        logger.flush();
        previous(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directory_wins() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/var/log/chat_router")),
            ..LoggingConfig::default()
        };
        assert_eq!(
            config.effective_directory(),
            PathBuf::from("/var/log/chat_router")
        );
    }

    #[test]
    fn stderr_echo_can_be_disabled() {
        let config = LoggingConfig {
            echo_to_stderr: false,
            ..LoggingConfig::default()
        };
        assert!(matches!(config.duplicate(), Duplicate::None));
        assert!(matches!(LoggingConfig::default().duplicate(), Duplicate::Info));
    }
}
