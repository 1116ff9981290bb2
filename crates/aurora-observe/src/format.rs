use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::LoggerError;

/// Output encoding for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerFormat {
    #[default]
    Text,
    Json,
    /// Native journald fields. Only installable on Linux with the `journald` feature.
    Journald,
}

impl LoggerFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggerFormat::Text => "text",
            LoggerFormat::Json => "json",
            LoggerFormat::Journald => "journald",
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            LoggerFormat::Journald => cfg!(all(target_os = "linux", feature = "journald")),
            LoggerFormat::Text | LoggerFormat::Json => true,
        }
    }
}

impl fmt::Display for LoggerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoggerFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LoggerFormat::Text),
            "json" => Ok(LoggerFormat::Json),
            "journald" | "journal" => Ok(LoggerFormat::Journald),
            _ => Err(LoggerError::UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!("text".parse::<LoggerFormat>().unwrap(), LoggerFormat::Text);
        assert_eq!(" JSON ".parse::<LoggerFormat>().unwrap(), LoggerFormat::Json);
        assert_eq!(
            "journal".parse::<LoggerFormat>().unwrap(),
            LoggerFormat::Journald
        );
    }

    #[test]
    fn rejects_unknown_format() {
        let err = "yaml".parse::<LoggerFormat>().unwrap_err();
        assert!(matches!(err, LoggerError::UnknownFormat(ref s) if s == "yaml"));
    }

    #[test]
    fn display_matches_parse() {
        for f in [LoggerFormat::Text, LoggerFormat::Json, LoggerFormat::Journald] {
            assert_eq!(f.to_string().parse::<LoggerFormat>().unwrap(), f);
        }
    }
}
