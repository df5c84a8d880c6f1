// Last resort when the log file is out of reach: syslog on Linux, stderr otherwise.

use crate::level::Level;

#[cfg(target_os = "linux")]
type SystemLogger = syslog::Logger<syslog::LoggerBackend, syslog::Formatter3164>;

pub struct SystemLog {
    process: String,
    #[cfg(target_os = "linux")]
    logger: Option<std::sync::Mutex<SystemLogger>>,
}

impl SystemLog {
    #[cfg(target_os = "linux")]
    pub fn connect(process: &str) -> Self {
        let formatter = syslog::Formatter3164 {
            facility: syslog::Facility::LOG_USER,
            hostname: None,
            process: process.to_owned(),
            pid: std::process::id(),
        };
        SystemLog {
            process: process.to_owned(),
            logger: syslog::unix(formatter).ok().map(std::sync::Mutex::new),
        }
    }

    #[cfg(not(target_os = "linux"))]
    pub fn connect(process: &str) -> Self {
        SystemLog {
            process: process.to_owned(),
        }
    }

    #[cfg(target_os = "linux")]
    pub fn report(&self, level: Level, message: &str) {
        let Some(logger) = self.logger.as_ref() else {
            self.print_stderr(level, message);
            return;
        };
        let mut logger = logger
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let sent = match level {
            Level::Emergency => logger.emerg(message),
            Level::Alert => logger.alert(message),
            Level::Critical => logger.crit(message),
            Level::Error => logger.err(message),
            Level::Warning => logger.warning(message),
            Level::Notice => logger.notice(message),
            Level::Info => logger.info(message),
            Level::Debug => logger.debug(message),
        };
        if sent.is_err() {
            self.print_stderr(level, message);
        }
    }

    #[cfg(not(target_os = "linux"))]
    pub fn report(&self, level: Level, message: &str) {
        self.print_stderr(level, message);
    }

    fn print_stderr(&self, level: Level, message: &str) {
        eprintln!("{}: [{}] {}", self.process, level, message);
    }
}
