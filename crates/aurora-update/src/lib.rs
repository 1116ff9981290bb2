mod error;
pub use error::{BatchError, ConfigError, EndpointError};

mod batch;
pub use batch::{current_batch, strategy_current_batch};

mod endpoint;
pub use endpoint::{API_PATH, DEFAULT_PORT, validate_address};

mod status;
pub use status::{
    JobUpdateStatusExt, ScheduleStatusExt, active_job_update_states, active_states,
    awaiting_pulse_job_update_states, init_status_tables, live_states, slave_assigned_states,
    terminal_states, terminal_update_states,
};

mod update;
pub use update::JobUpdate;

mod config;
pub use config::{ClientConfig, Transport};

pub use aurora_model::TaskError;

pub mod prelude {
    pub use crate::{ClientConfig, JobUpdate, JobUpdateStatusExt, ScheduleStatusExt};
    pub use crate::{current_batch, validate_address};
    pub use aurora_model::{AuroraTask, JobUpdateRequest, JobUpdateStrategy, TaskConfig};
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Once;

    use aurora_observe::{LoggerConfig, LoggerError, logger_init};

    static LOGGING: Once = Once::new();

    /// Route this crate's events into captured test output. Safe to call from every test.
    pub fn init_logging() {
        LOGGING.call_once(|| {
            let cfg = LoggerConfig::for_tests("aurora_update=trace,aurora_model=debug");
            match logger_init(&cfg) {
                Ok(()) | Err(LoggerError::AlreadyInstalled) => {}
                Err(e) => panic!("test logger: {e}"),
            }
        });
    }
}
