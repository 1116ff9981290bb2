//! Logging bootstrap for the scheduler client crates.
//!
//! Library crates only emit `tracing` events. A process (or a test binary) calls
//! [`logger_init`] once to decide where those events go.
mod config;
pub use config::{DEFAULT_FILTER, FILTER_ENV, LoggerConfig};

mod error;
pub use error::LoggerError;

mod format;
pub use format::LoggerFormat;

mod init;
pub use init::logger_init;
