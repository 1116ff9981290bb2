use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, Registry, fmt,
    fmt::{
        time::OffsetTime,
        writer::{BoxMakeWriter, TestWriter},
    },
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::{config::LoggerConfig, error::LoggerError, format::LoggerFormat};

type Filtered = Layered<EnvFilter, Registry>;

/// Install the process-wide `tracing` subscriber described by `cfg`.
///
/// The filter and the format are checked before anything is installed, so a rejected
/// config leaves logging untouched. Fails with [`LoggerError::AlreadyInstalled`] when a
/// global subscriber already exists.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    let directives = cfg.effective_filter();
    let filter =
        EnvFilter::try_new(&directives).map_err(|source| LoggerError::InvalidFilter {
            directives: directives.clone(),
            source,
        })?;

    if !cfg.format.is_available() {
        return Err(LoggerError::JournaldUnavailable);
    }
    if tracing::dispatcher::has_been_set() {
        return Err(LoggerError::AlreadyInstalled);
    }

    let registry = tracing_subscriber::registry().with(filter);
    match cfg.format {
        LoggerFormat::Text => registry
            .with(
                fmt::layer()
                    .with_ansi(cfg.use_color)
                    .with_target(cfg.with_targets)
                    .with_timer(timer())
                    .with_writer(writer(cfg)),
            )
            .try_init()?,
        LoggerFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_target(cfg.with_targets)
                    .with_timer(timer())
                    .with_writer(writer(cfg)),
            )
            .try_init()?,
        LoggerFormat::Journald => install_journald(registry)?,
    }

    debug!(format = %cfg.format, filter = %directives, "logger installed");
    Ok(())
}

fn timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn writer(cfg: &LoggerConfig) -> BoxMakeWriter {
    if cfg.test_writer {
        BoxMakeWriter::new(TestWriter::default())
    } else {
        BoxMakeWriter::new(std::io::stdout)
    }
}

#[cfg(all(target_os = "linux", feature = "journald"))]
fn install_journald(registry: Filtered) -> Result<(), LoggerError> {
    let journald = tracing_journald::layer()?;
    registry.with(journald).try_init()?;
    Ok(())
}

#[cfg(not(all(target_os = "linux", feature = "journald")))]
fn install_journald(_registry: Filtered) -> Result<(), LoggerError> {
    Err(LoggerError::JournaldUnavailable)
}
