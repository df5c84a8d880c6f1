use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Construction,
    Write,
    InvalidLevel,
    InvalidOption,
}

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("could not create log directory {}: {source}", .path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    #[error("log file {} is not writable, check its permissions", .path.display())]
    NotWritable { path: PathBuf },

    #[error("could not open log destination {destination}: {source}")]
    Open { destination: String, source: io::Error },

    #[error("unknown standard stream '{0}'")]
    UnknownStream(String),

    #[error("could not write to log destination: {0}")]
    Write(#[source] io::Error),

    #[error("could not flush log destination: {0}")]
    Flush(#[source] io::Error),

    #[error("unknown log level '{0}'")]
    InvalidLevel(String),

    #[error("invalid date format '{0}'")]
    InvalidDateFormat(String),

    #[error("invalid logger name '{0}'")]
    InvalidName(String),
}

impl LoggerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoggerError::CreateDirectory { .. }
            | LoggerError::NotWritable { .. }
            | LoggerError::Open { .. }
            | LoggerError::UnknownStream(_) => ErrorKind::Construction,
            LoggerError::Write(_) | LoggerError::Flush(_) => ErrorKind::Write,
            LoggerError::InvalidLevel(_) => ErrorKind::InvalidLevel,
            LoggerError::InvalidDateFormat(_) | LoggerError::InvalidName(_) => {
                ErrorKind::InvalidOption
            }
        }
    }
}
