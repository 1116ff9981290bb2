use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MIN_WAIT_IN_RUNNING_MS, TaskConfig};

/// Inclusive range of instance ids, `[first, last]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub first: i32,
    pub last: i32,
}

impl Range {
    pub fn new(first: i32, last: i32) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, instance: i32) -> bool {
        self.first <= instance && instance <= self.last
    }
}

/// Rollout strategy for an update.
///
/// Only one strategy is in effect for a given update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum JobUpdateStrategy {
    /// Fixed-size batches; each batch must finish before the next one starts.
    #[serde(rename_all = "camelCase")]
    Batch {
        group_size: i32,
        autopause_after_batch: bool,
    },
    /// A single rolling queue that keeps `group_size` instances in flight.
    #[serde(rename_all = "camelCase")]
    Queue { group_size: i32 },
    /// Batches with explicit sizes. Once the list is exhausted the last size repeats.
    #[serde(rename_all = "camelCase")]
    VariableBatch {
        group_sizes: Vec<i32>,
        autopause_after_batch: bool,
    },
}

impl JobUpdateStrategy {
    /// Returns a short symbolic identifier for the strategy, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            JobUpdateStrategy::Batch { .. } => "batch",
            JobUpdateStrategy::Queue { .. } => "queue",
            JobUpdateStrategy::VariableBatch { .. } => "variable-batch",
        }
    }

    /// Whether the update pauses itself once a batch completes.
    pub fn autopause_after_batch(&self) -> bool {
        match self {
            JobUpdateStrategy::Batch {
                autopause_after_batch,
                ..
            }
            | JobUpdateStrategy::VariableBatch {
                autopause_after_batch,
                ..
            } => *autopause_after_batch,
            JobUpdateStrategy::Queue { .. } => false,
        }
    }
}

/// Knobs controlling how the scheduler rolls an update across instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateSettings {
    /// Instances updated concurrently when no explicit strategy is set.
    pub update_group_size: i32,
    /// Instances to update. Empty means every instance.
    #[serde(default)]
    pub update_only_these_instances: Vec<Range>,
    pub wait_for_batch_completion: bool,
    /// How long an instance must stay running before it counts as updated.
    pub min_wait_in_instance_running_ms: i32,
    pub max_per_instance_failures: i32,
    pub max_failed_instances: i32,
    pub rollback_on_failure: bool,
    /// When set, the update blocks unless a pulse arrives within this many milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_if_no_pulses_after_ms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sla_aware: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_strategy: Option<JobUpdateStrategy>,
}

impl Default for JobUpdateSettings {
    fn default() -> Self {
        Self {
            update_group_size: 1,
            update_only_these_instances: Vec::new(),
            wait_for_batch_completion: false,
            min_wait_in_instance_running_ms: DEFAULT_MIN_WAIT_IN_RUNNING_MS,
            max_per_instance_failures: 0,
            max_failed_instances: 0,
            rollback_on_failure: true,
            block_if_no_pulses_after_ms: None,
            sla_aware: None,
            update_strategy: None,
        }
    }
}

/// Everything the scheduler needs to start an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdateRequest {
    pub task_config: TaskConfig,
    /// Instance count the job has once the update completes.
    pub instance_count: i32,
    pub settings: JobUpdateSettings,
}
