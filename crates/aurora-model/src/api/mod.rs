mod job_key;
pub use job_key::JobKey;

mod resource;
pub use resource::Resource;

mod constraint;
pub use constraint::{Constraint, TaskConstraint};

mod container;
pub use container::{Container, DockerParameter, Image};

mod task_config;
pub use task_config::{ExecutorConfig, MesosFetcherUri, Metadata, PartitionPolicy, TaskConfig};

mod status;
pub use status::{
    ACTIVE_JOB_UPDATE_STATES, ACTIVE_STATES, AWAITING_PULSE_JOB_UPDATE_STATES, JobUpdateStatus,
    LIVE_STATES, SLAVE_ASSIGNED_STATES, ScheduleStatus, TERMINAL_STATES, TERMINAL_UPDATE_STATES,
};

mod update;
pub use update::{JobUpdateRequest, JobUpdateSettings, JobUpdateStrategy, Range};

/// Default number of milliseconds an instance must stay running before it is considered updated.
pub const DEFAULT_MIN_WAIT_IN_RUNNING_MS: i32 = 45_000;
