use thiserror::Error;
use tracing_subscriber::{filter::ParseError, util::TryInitError};

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("unknown log format {0:?}, expected text, json or journald")]
    UnknownFormat(String),
    #[error("journald output requires linux and the `journald` feature")]
    JournaldUnavailable,
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
    #[error("invalid log filter {directives:?}: {source}")]
    InvalidFilter {
        directives: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to connect to journald: {0}")]
    Journald(#[from] std::io::Error),
    #[error("failed to install subscriber: {0}")]
    Install(#[from] TryInitError),
}
