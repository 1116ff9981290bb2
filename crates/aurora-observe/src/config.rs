use std::io::IsTerminal;

use serde::{Deserialize, Serialize};

use crate::format::LoggerFormat;

/// Environment variable whose directives replace [`LoggerConfig::filter`] when set.
pub const FILTER_ENV: &str = "AURORA_LOG";

/// Quiet for dependencies, informational for the update crates.
pub const DEFAULT_FILTER: &str = "warn,aurora_model=info,aurora_update=info";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directives, e.g. `"warn,aurora_update=trace"`.
    pub filter: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// Write through the test harness so output is captured per test.
    #[serde(skip)]
    pub test_writer: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: LoggerFormat::Text,
            filter: DEFAULT_FILTER.to_string(),
            with_targets: true,
            use_color: std::io::stdout().is_terminal(),
            test_writer: false,
        }
    }
}

impl LoggerConfig {
    /// Plain text into the test harness's captured output.
    pub fn for_tests(filter: impl Into<String>) -> Self {
        Self {
            format: LoggerFormat::Text,
            filter: filter.into(),
            with_targets: true,
            use_color: false,
            test_writer: true,
        }
    }

    pub fn with_format(mut self, format: LoggerFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Directives actually installed: `AURORA_LOG` if set and non-blank, else `filter`.
    pub fn effective_filter(&self) -> String {
        std::env::var(FILTER_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.filter.clone())
    }
}
