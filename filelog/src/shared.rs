use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::context::Context;
use crate::error::Result;
use crate::level::Level;
use crate::logger::FileLogger;
use crate::sink::Destination;
use crate::system::SystemLog;

#[derive(Clone)]
pub struct SharedLogger {
    inner: Arc<Mutex<FileLogger>>,
}

impl SharedLogger {
    pub fn new(logger: FileLogger) -> Self {
        SharedLogger {
            inner: Arc::new(Mutex::new(logger)),
        }
    }

    // A panic while logging leaves the logger itself consistent.
    fn lock(&self) -> MutexGuard<'_, FileLogger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut FileLogger) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn log(&self, level: Level, message: &str, context: &Context) -> Result<()> {
        self.lock().log(level, message, context)
    }

    // `None` when the logger is busy, for callers that must not block.
    pub fn try_log(&self, level: Level, message: &str, context: &Context) -> Option<Result<()>> {
        let mut logger = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return None,
        };
        Some(logger.log(level, message, context))
    }

    pub fn log_named(&self, level: &str, message: &str, context: &Context) -> Result<()> {
        self.lock().log_named(level, message, context)
    }

    level_methods!(ref);

    pub fn write(&self, line: &str) -> Result<()> {
        self.lock().write(line)
    }

    pub fn flush(&self) -> Result<()> {
        self.lock().flush()
    }

    pub fn destination(&self) -> Destination {
        self.lock().destination().clone()
    }

    pub fn last_line(&self) -> String {
        self.lock().last_line().to_owned()
    }

    pub fn line_count(&self) -> u64 {
        self.lock().line_count()
    }

    pub fn set_threshold(&self, threshold: Level) {
        self.lock().set_threshold(threshold);
    }

    pub fn set_date_format(&self, pattern: &str) -> Result<()> {
        self.lock().set_date_format(pattern)
    }
}

// ===== `log` facade bridge =====

// Records the file refuses go to the system log instead.
pub struct LogBridge {
    logger: SharedLogger,
    system: SystemLog,
}

impl LogBridge {
    pub fn new(logger: SharedLogger, system: SystemLog) -> Self {
        LogBridge { logger, system }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        Level::from_log(metadata.level()).passes(self.logger.lock().threshold())
    }

    fn log(&self, record: &Record<'_>) {
        let level = Level::from_log(record.level());
        let message = record.args().to_string();
        if let Err(e) = self.logger.log(level, &message, &Context::new()) {
            self.system.report(level, &format!("{message} (log unavailable: {e})"));
        }
    }

    fn flush(&self) {
        if let Err(e) = self.logger.flush() {
            self.system.report(Level::Error, &e.to_string());
        }
    }
}

/// Routes the `log` macros of the whole process into `logger`.
pub fn init_log_facade(
    logger: SharedLogger,
    max_level: LevelFilter,
    process: &str,
) -> std::result::Result<(), SetLoggerError> {
    let bridge = LogBridge::new(logger, SystemLog::connect(process));
    log::set_boxed_logger(Box::new(bridge))?;
    log::set_max_level(max_level);
    Ok(())
}
