//! Leveled append-only file logger with a per-component registry.

// ===== Per-level methods =====

macro_rules! level_methods {
    (@gen mut $($name:ident, $with:ident => $level:ident;)*) => {
        $(
            pub fn $name(&mut self, message: &str) -> $crate::Result<()> {
                self.log($crate::Level::$level, message, &$crate::Context::new())
            }

            pub fn $with(&mut self, message: &str, context: &$crate::Context) -> $crate::Result<()> {
                self.log($crate::Level::$level, message, context)
            }
        )*
    };
    (@gen ref $($name:ident, $with:ident => $level:ident;)*) => {
        $(
            pub fn $name(&self, message: &str) -> $crate::Result<()> {
                self.log($crate::Level::$level, message, &$crate::Context::new())
            }

            pub fn $with(&self, message: &str, context: &$crate::Context) -> $crate::Result<()> {
                self.log($crate::Level::$level, message, context)
            }
        )*
    };
    ($receiver:tt) => {
        level_methods! {
            @gen $receiver
            emergency, emergency_with => Emergency;
            alert, alert_with => Alert;
            critical, critical_with => Critical;
            error, error_with => Error;
            warning, warning_with => Warning;
            notice, notice_with => Notice;
            info, info_with => Info;
            debug, debug_with => Debug;
        }
    };
}

mod boundary;
mod context;
mod error;
mod format;
mod level;
mod logger;
mod options;
mod registry;
mod shared;
mod sink;
mod system;

pub use boundary::{ErrorBoundary, GENERIC_FAILURE_MESSAGE};
pub use context::{context_to_string, Context};
pub use error::{ErrorKind, LoggerError, Result};
pub use format::format_record;
pub use level::Level;
pub use logger::FileLogger;
pub use options::LoggerOptions;
pub use registry::LoggerRegistry;
pub use shared::{init_log_facade, LogBridge, SharedLogger};
pub use sink::{Destination, STREAM_SCHEME};
pub use system::SystemLog;

// ===== Macros =====

#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Emergency, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Alert, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Critical, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Error, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Warning, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Notice, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Info, &format!($($arg)*), &$crate::Context::new())
    };
}
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.log($crate::Level::Debug, &format!($($arg)*), &$crate::Context::new())
    };
}
