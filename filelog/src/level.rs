use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::LoggerError;

// ===== Severity levels =====

// The discriminant is the priority, `Emergency` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Info = 6,
    Debug = 7,
}

impl Level {
    pub const ALL: [Level; 8] = [
        Level::Emergency,
        Level::Alert,
        Level::Critical,
        Level::Error,
        Level::Warning,
        Level::Notice,
        Level::Info,
        Level::Debug,
    ];

    pub fn priority(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Emergency => "emergency",
            Level::Alert => "alert",
            Level::Critical => "critical",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Notice => "notice",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }

    pub fn passes(self, threshold: Level) -> bool {
        self.priority() <= threshold.priority()
    }

    pub(crate) fn from_log(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warning,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LoggerError::InvalidLevel(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_run_from_emergency_to_debug() {
        let priorities: Vec<u8> = Level::ALL.iter().map(|l| l.priority()).collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn threshold_admits_equal_and_more_severe() {
        assert!(Level::Error.passes(Level::Warning));
        assert!(Level::Warning.passes(Level::Warning));
        assert!(!Level::Notice.passes(Level::Warning));
        assert!(Level::Debug.passes(Level::Debug));
        assert!(!Level::Alert.passes(Level::Emergency));
    }

    #[test]
    fn parses_lowercase_names_only() {
        assert_eq!("critical".parse::<Level>().unwrap(), Level::Critical);
        assert!(matches!(
            "fatal".parse::<Level>(),
            Err(LoggerError::InvalidLevel(name)) if name == "fatal"
        ));
        assert!("ERROR".parse::<Level>().is_err());
    }

    #[test]
    fn log_facade_levels_map_down() {
        assert_eq!(Level::from_log(log::Level::Warn), Level::Warning);
        assert_eq!(Level::from_log(log::Level::Trace), Level::Debug);
    }
}
