use serde::{Deserialize, Serialize};

use crate::{Constraint, Container, JobKey, Resource};

/// Wire representation of a task: everything the scheduler needs to launch one instance of a job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskConfig {
    /// Job this task belongs to.
    pub job: JobKey,
    /// Whether the task is restarted after it terminates, regardless of exit status.
    #[serde(default)]
    pub is_service: bool,
    /// Number of failures tolerated before the task is no longer rescheduled.
    pub max_task_failures: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<Resource>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<Constraint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executor_config: Option<ExecutorConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metadata: Vec<Metadata>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mesos_fetcher_uris: Vec<MesosFetcherUri>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_policy: Option<PartitionPolicy>,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            job: JobKey::default(),
            is_service: false,
            max_task_failures: 1,
            tier: None,
            resources: Vec::new(),
            constraints: Vec::new(),
            container: Some(Container::default()),
            executor_config: None,
            metadata: Vec::new(),
            mesos_fetcher_uris: Vec::new(),
            partition_policy: None,
        }
    }
}

/// Executor identity and its opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    pub name: String,
    pub data: String,
}

/// Free-form label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub key: String,
    pub value: String,
}

/// Artifact the agent downloads into the sandbox before the task starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MesosFetcherUri {
    pub value: String,
    /// Unpack archives after download.
    pub extract: bool,
    /// Keep the artifact in the agent's fetcher cache.
    pub cache: bool,
}

/// What happens to a task whose agent becomes partitioned from the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionPolicy {
    pub reschedule: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_secs: Option<i64>,
}
