//! Syslog severities (RFC 5424 §6.2.1) and the mapping from [`Level`].

use serde::{Serialize, Serializer};

use crate::types::Level;

/// Syslog severity, 0 (emergency) to 7 (debug).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SyslogSeverity {
    Emergency = 0,
    Alert = 1,
    Critical = 2,
    Error = 3,
    Warning = 4,
    Notice = 5,
    Informational = 6,
    Debug = 7,
}

impl SyslogSeverity {
    /// Only the five named levels have a counterpart; everything else,
    /// `NOTSET` and in-between numbers included, is reported as `Alert`.
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::CRITICAL => SyslogSeverity::Critical,
            Level::ERROR => SyslogSeverity::Error,
            Level::WARNING => SyslogSeverity::Warning,
            Level::INFO => SyslogSeverity::Informational,
            Level::DEBUG => SyslogSeverity::Debug,
            _ => SyslogSeverity::Alert,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<Level> for SyslogSeverity {
    fn from(level: Level) -> Self {
        Self::from_level(level)
    }
}

impl Serialize for SyslogSeverity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}
