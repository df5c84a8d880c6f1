use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::OnceCell;

use crate::error::{LoggerError, Result};
use crate::level::Level;
use crate::logger::FileLogger;
use crate::options::LoggerOptions;
use crate::shared::SharedLogger;

pub const DEFAULT_LOGGER_NAME: &str = "default";

// Each component writes `<name>__<YYYY-MM-DD>.log`, flushed after every line.
pub struct LoggerRegistry {
    base_dir: PathBuf,
    threshold: Level,
    options: LoggerOptions,
    default_name: String,
    loggers: Mutex<HashMap<String, Arc<OnceCell<SharedLogger>>>>,
}

impl LoggerRegistry {
    pub fn new<P: Into<PathBuf>>(base_dir: P, threshold: Level) -> Self {
        LoggerRegistry {
            base_dir: base_dir.into(),
            threshold,
            options: LoggerOptions::default()
                .with_extension("log")
                .with_flush_frequency(1),
            default_name: DEFAULT_LOGGER_NAME.to_owned(),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    // The prefix is replaced per name.
    #[must_use]
    pub fn with_options(mut self, options: LoggerOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_default_name(mut self, name: impl Into<String>) -> Self {
        self.default_name = name.into();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn get_or_create(&self, name: &str) -> Result<SharedLogger> {
        let options = self.options.clone().with_prefix(format!("{name}__"));
        self.get_or_create_with(name, self.threshold, options)
    }

    // `threshold` and `options` only count on first use. Failures are not cached.
    pub fn get_or_create_with(
        &self,
        name: &str,
        threshold: Level,
        options: LoggerOptions,
    ) -> Result<SharedLogger> {
        check_name(name)?;
        let cell = {
            let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(loggers.entry(name.to_owned()).or_default())
        };

        // The map lock is released; only callers asking for this name wait here.
        let logger = cell.get_or_try_init(|| {
            FileLogger::new(&self.base_dir, threshold, options).map(SharedLogger::new)
        })?;
        Ok(logger.clone())
    }

    pub fn default_logger(&self) -> Result<SharedLogger> {
        self.get_or_create(&self.default_name)
    }

    // Never constructs; safe to call from a panic hook.
    pub fn open_logger(&self, name: &str) -> Option<SharedLogger> {
        let loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        loggers.get(name).and_then(|cell| cell.get().cloned())
    }

    pub fn open_default_logger(&self) -> Option<SharedLogger> {
        self.open_logger(&self.default_name)
    }

    pub fn names(&self) -> Vec<String> {
        let loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = loggers
            .iter()
            .filter(|(_, cell)| cell.get().is_some())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }
}

// Names end up in file names and must stay inside the base directory.
fn check_name(name: &str) -> Result<()> {
    if name.is_empty() || name.contains("..") || name.chars().any(std::path::is_separator) {
        return Err(LoggerError::InvalidName(name.to_owned()));
    }
    Ok(())
}
