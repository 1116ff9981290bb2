use std::time::Duration;

use aurora_model::{
    AuroraTask, Container, JobKey, JobUpdateRequest, JobUpdateSettings, JobUpdateStrategy,
    PartitionPolicy, Range, TaskConfig, TaskError, ThermosExecutor,
};
use tracing::trace;

use crate::{batch::strategy_current_batch, error::BatchError};

/// Builder for a job update request.
///
/// Owns its task and its settings outright; nothing is shared with the task it was created
/// from. Settings start at the scheduler defaults (see [`JobUpdateSettings::default`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobUpdate {
    task: AuroraTask,
    instance_count: i32,
    settings: JobUpdateSettings,
}

impl JobUpdate {
    /// Update for an empty task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update that copies `task`, Thermos executor included.
    pub fn from_aurora_task(task: &AuroraTask) -> Self {
        Self::with_task(task.clone())
    }

    /// Update that copies a bare wire config.
    ///
    /// The config carries no Thermos structure of its own; a Thermos payload already present
    /// in its executor data is decoded when possible.
    pub fn from_config(config: &TaskConfig) -> Self {
        Self::with_task(AuroraTask::from_config(config))
    }

    fn with_task(task: AuroraTask) -> Self {
        Self {
            task,
            instance_count: 0,
            settings: JobUpdateSettings::default(),
        }
    }

    /// Instance count the job has once the update completes.
    ///
    /// Not validated here; the scheduler rejects impossible counts.
    pub fn instance_count(&mut self, count: i32) -> &mut Self {
        self.instance_count = count;
        self
    }

    /// Max number of instances updated at any given moment.
    pub fn batch_size(&mut self, size: i32) -> &mut Self {
        self.settings.update_group_size = size;
        self
    }

    /// Minimum time an instance must stay running before it is considered updated.
    pub fn watch_time(&mut self, watch: Duration) -> &mut Self {
        self.settings.min_wait_in_instance_running_ms = millis(watch);
        self
    }

    /// Wait for every instance of a batch to finish before starting the next one.
    pub fn wait_for_batch_completion(&mut self, wait: bool) -> &mut Self {
        self.settings.wait_for_batch_completion = wait;
        self
    }

    /// Failures tolerated per instance before the instance is marked failed.
    pub fn max_per_instance_failures(&mut self, max: i32) -> &mut Self {
        self.settings.max_per_instance_failures = max;
        self
    }

    /// Failed instances tolerated before the update as a whole fails.
    pub fn max_failed_instances(&mut self, max: i32) -> &mut Self {
        self.settings.max_failed_instances = max;
        self
    }

    /// When false, a failed update is left in place instead of rolled back.
    pub fn rollback_on_fail(&mut self, rollback: bool) -> &mut Self {
        self.settings.rollback_on_failure = rollback;
        self
    }

    /// Block the update unless a pulse arrives within `timeout`.
    pub fn pulse_interval_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.settings.block_if_no_pulses_after_ms = Some(millis(timeout));
        self
    }

    /// Ask the scheduler to apply its SLA-aware policy, for jobs that qualify.
    pub fn sla_aware(&mut self, sla_aware: bool) -> &mut Self {
        self.settings.sla_aware = Some(sla_aware);
        self
    }

    pub fn batch_update_strategy(&mut self, auto_pause: bool, group_size: i32) -> &mut Self {
        self.strategy(JobUpdateStrategy::Batch {
            group_size,
            autopause_after_batch: auto_pause,
        })
    }

    pub fn queue_update_strategy(&mut self, group_size: i32) -> &mut Self {
        self.strategy(JobUpdateStrategy::Queue { group_size })
    }

    pub fn variable_batch_strategy<I>(&mut self, auto_pause: bool, group_sizes: I) -> &mut Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.strategy(JobUpdateStrategy::VariableBatch {
            group_sizes: group_sizes.into_iter().collect(),
            autopause_after_batch: auto_pause,
        })
    }

    /// Replace the update strategy.
    pub fn strategy(&mut self, strategy: JobUpdateStrategy) -> &mut Self {
        if let Some(prev) = &self.settings.update_strategy {
            trace!(
                previous = prev.kind(),
                next = strategy.kind(),
                "update strategy replaced"
            );
        }
        self.settings.update_strategy = Some(strategy);
        self
    }

    /// Restrict the update to instances `first..=last`.
    ///
    /// Ranges are appended as given; overlapping ranges are not merged.
    pub fn add_instance_range(&mut self, first: i32, last: i32) -> &mut Self {
        self.settings
            .update_only_these_instances
            .push(Range::new(first, last));
        self
    }

    pub fn settings(&self) -> &JobUpdateSettings {
        &self.settings
    }

    pub fn task(&self) -> &AuroraTask {
        &self.task
    }

    /// Batch that `updating_instances` falls into under this update's strategy.
    pub fn current_batch(&self, updating_instances: i32) -> Result<usize, BatchError> {
        strategy_current_batch(self.settings.update_strategy.as_ref(), updating_instances)
    }

    /// Snapshot of the request as it stands.
    pub fn request(&self) -> JobUpdateRequest {
        JobUpdateRequest {
            task_config: self.task.task_config().clone(),
            instance_count: self.instance_count,
            settings: self.settings.clone(),
        }
    }

    pub fn into_request(self) -> JobUpdateRequest {
        JobUpdateRequest {
            task_config: self.task.into_task_config(),
            instance_count: self.instance_count,
            settings: self.settings,
        }
    }

    // Task pass-through, see `AuroraTask`.

    pub fn environment(&mut self, env: impl Into<String>) -> &mut Self {
        self.task.environment(env);
        self
    }

    pub fn role(&mut self, role: impl Into<String>) -> &mut Self {
        self.task.role(role);
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.task.name(name);
        self
    }

    pub fn executor_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.task.executor_name(name);
        self
    }

    pub fn executor_data(&mut self, data: impl Into<String>) -> &mut Self {
        self.task.executor_data(data);
        self
    }

    pub fn cpu(&mut self, cpus: f64) -> &mut Self {
        self.task.cpu(cpus);
        self
    }

    pub fn ram(&mut self, ram_mb: i64) -> &mut Self {
        self.task.ram(ram_mb);
        self
    }

    pub fn disk(&mut self, disk_mb: i64) -> &mut Self {
        self.task.disk(disk_mb);
        self
    }

    pub fn gpu(&mut self, gpus: i64) -> &mut Self {
        self.task.gpu(gpus);
        self
    }

    pub fn tier(&mut self, tier: impl Into<String>) -> &mut Self {
        self.task.tier(tier);
        self
    }

    pub fn task_max_failure(&mut self, max_fail: i32) -> &mut Self {
        self.task.max_failure(max_fail);
        self
    }

    pub fn is_service(&mut self, is_service: bool) -> &mut Self {
        self.task.is_service(is_service);
        self
    }

    pub fn add_uris<I, S>(&mut self, extract: bool, cache: bool, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.add_uris(extract, cache, values);
        self
    }

    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.task.add_label(key, value);
        self
    }

    pub fn add_named_ports<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.add_named_ports(names);
        self
    }

    pub fn add_ports(&mut self, num: usize) -> &mut Self {
        self.task.add_ports(num);
        self
    }

    pub fn add_value_constraint<I, S>(
        &mut self,
        name: impl Into<String>,
        negated: bool,
        values: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.add_value_constraint(name, negated, values);
        self
    }

    pub fn add_limit_constraint(&mut self, name: impl Into<String>, limit: i32) -> &mut Self {
        self.task.add_limit_constraint(name, limit);
        self
    }

    pub fn add_dedicated_constraint(&mut self, role: &str, name: &str) -> &mut Self {
        self.task.add_dedicated_constraint(role, name);
        self
    }

    pub fn container(&mut self, container: Container) -> &mut Self {
        self.task.container(container);
        self
    }

    pub fn thermos_executor(&mut self, thermos: ThermosExecutor) -> &mut Self {
        self.task.thermos_executor(thermos);
        self
    }

    /// Encode the Thermos executor into the task's executor data.
    ///
    /// On error nothing is changed and the builder stays usable.
    pub fn build_thermos_payload(&mut self) -> Result<&mut Self, TaskError> {
        self.task.build_thermos_payload()?;
        Ok(self)
    }

    pub fn partition_policy(&mut self, reschedule: bool, delay_secs: i64) -> &mut Self {
        self.task.partition_policy(PartitionPolicy {
            reschedule,
            delay_secs: Some(delay_secs),
        });
        self
    }

    /// Wire representation of the embedded task.
    pub fn task_config(&self) -> &TaskConfig {
        self.task.task_config()
    }

    pub fn job_key(&self) -> JobKey {
        self.task.job_key()
    }
}

fn millis(d: Duration) -> i32 {
    i32::try_from(d.as_millis()).unwrap_or(i32::MAX)
}
