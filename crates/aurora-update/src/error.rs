use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("error parsing url: {0}")]
    Parse(#[from] url::ParseError),
    #[error("no host to attach a port to: {0}")]
    MissingHost(String),
    #[error("only protocols http and https are supported, got: {0}")]
    UnsupportedScheme(String),
    #[error("expected /api path, got: {0}")]
    UnexpectedPath(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("batch size list is empty")]
    Empty,
    #[error("batch size at index {index} must be positive, got {size}")]
    NonPositiveSize { index: usize, size: i32 },
    #[error("{0} update strategy has no batches")]
    NotBatched(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scheduler endpoint: {0}")]
    Endpoint(#[from] EndpointError),
    #[error("invalid transport: {0} (expected: json|binary)")]
    InvalidTransport(String),
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}
