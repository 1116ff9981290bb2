mod api;
pub use api::*;

mod task;
pub use task::{
    AuroraTask, PORT_PREFIX, TaskError, THERMOS_EXECUTOR_NAME, ThermosConstraint, ThermosExecutor,
    ThermosProcess, ThermosResources, ThermosTask,
};
