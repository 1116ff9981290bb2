mod error;
pub use error::TaskError;

mod thermos;
pub use thermos::{
    THERMOS_EXECUTOR_NAME, ThermosConstraint, ThermosExecutor, ThermosProcess, ThermosResources,
    ThermosTask,
};

use tracing::debug;

use crate::{
    Constraint, Container, ExecutorConfig, JobKey, MesosFetcherUri, Metadata, PartitionPolicy,
    Resource, TaskConfig, TaskConstraint,
};

/// Prefix for generated port names, see [`AuroraTask::add_ports`].
pub const PORT_PREFIX: &str = "org.apache.aurora.port.";

/// Task builder layered over a [`TaskConfig`].
///
/// Unlike the bare wire type it understands the Thermos executor, whose payload is kept
/// structured until [`AuroraTask::build_thermos_payload`] encodes it into the executor data.
/// Cloning produces a fully independent copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuroraTask {
    config: TaskConfig,
    thermos: Option<ThermosExecutor>,
}

impl AuroraTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a task from a wire config.
    ///
    /// A Thermos payload found in the executor data is decoded so it can keep being edited.
    pub fn from_config(config: &TaskConfig) -> Self {
        let thermos = config
            .executor_config
            .as_ref()
            .filter(|e| e.name == THERMOS_EXECUTOR_NAME && !e.data.is_empty())
            .and_then(|e| match serde_json::from_str::<ThermosExecutor>(&e.data) {
                Ok(exec) => Some(exec),
                Err(err) => {
                    debug!(job = %config.job, error = %err, "executor data is not a thermos payload");
                    None
                }
            });

        Self {
            config: config.clone(),
            thermos,
        }
    }

    pub fn environment(&mut self, env: impl Into<String>) -> &mut Self {
        self.config.job.environment = env.into();
        self
    }

    pub fn role(&mut self, role: impl Into<String>) -> &mut Self {
        self.config.job.role = role.into();
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.job.name = name.into();
        self
    }

    pub fn executor_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.executor_mut().name = name.into();
        self
    }

    pub fn executor_data(&mut self, data: impl Into<String>) -> &mut Self {
        self.executor_mut().data = data.into();
        self
    }

    pub fn cpu(&mut self, cpus: f64) -> &mut Self {
        self.set_resource(Resource::NumCpus(cpus))
    }

    pub fn ram(&mut self, ram_mb: i64) -> &mut Self {
        self.set_resource(Resource::RamMb(ram_mb))
    }

    pub fn disk(&mut self, disk_mb: i64) -> &mut Self {
        self.set_resource(Resource::DiskMb(disk_mb))
    }

    pub fn gpu(&mut self, gpus: i64) -> &mut Self {
        self.set_resource(Resource::NumGpus(gpus))
    }

    pub fn tier(&mut self, tier: impl Into<String>) -> &mut Self {
        self.config.tier = Some(tier.into());
        self
    }

    /// Number of failures tolerated before the task is no longer rescheduled.
    pub fn max_failure(&mut self, max_fail: i32) -> &mut Self {
        self.config.max_task_failures = max_fail;
        self
    }

    pub fn is_service(&mut self, is_service: bool) -> &mut Self {
        self.config.is_service = is_service;
        self
    }

    pub fn add_uris<I, S>(&mut self, extract: bool, cache: bool, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .mesos_fetcher_uris
            .extend(values.into_iter().map(|value| MesosFetcherUri {
                value: value.into(),
                extract,
                cache,
            }));
        self
    }

    pub fn add_label(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.config.metadata.push(Metadata {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn add_named_ports<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .resources
            .extend(names.into_iter().map(|n| Resource::NamedPort(n.into())));
        self
    }

    /// Request `num` additional ports, named sequentially after the ports already present.
    pub fn add_ports(&mut self, num: usize) -> &mut Self {
        let start = self.port_count();
        self.config.resources.extend(
            (start..start + num).map(|i| Resource::NamedPort(format!("{PORT_PREFIX}{i}"))),
        );
        self
    }

    pub fn port_count(&self) -> usize {
        self.config
            .resources
            .iter()
            .filter(|r| r.port_name().is_some())
            .count()
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
        self.config.constraints.push(Constraint {
            name: name.into(),
            constraint: TaskConstraint::Value {
                negated,
                values: values.into_iter().map(Into::into).collect(),
            },
        });
        self
    }

    pub fn add_limit_constraint(&mut self, name: impl Into<String>, limit: i32) -> &mut Self {
        self.config.constraints.push(Constraint {
            name: name.into(),
            constraint: TaskConstraint::Limit { limit },
        });
        self
    }

    /// Pin the task to hosts dedicated to `role/name`.
    pub fn add_dedicated_constraint(&mut self, role: &str, name: &str) -> &mut Self {
        self.add_value_constraint("dedicated", false, [format!("{role}/{name}")])
    }

    pub fn container(&mut self, container: Container) -> &mut Self {
        self.config.container = Some(container);
        self
    }

    pub fn partition_policy(&mut self, policy: PartitionPolicy) -> &mut Self {
        self.config.partition_policy = Some(policy);
        self
    }

    /// Attach a Thermos executor. The payload is not encoded until [`Self::build_thermos_payload`].
    pub fn thermos_executor(&mut self, thermos: ThermosExecutor) -> &mut Self {
        self.thermos = Some(thermos);
        self.executor_name(THERMOS_EXECUTOR_NAME)
    }

    pub fn thermos(&self) -> Option<&ThermosExecutor> {
        self.thermos.as_ref()
    }

    /// Encode the attached Thermos executor into the executor data.
    ///
    /// Task resources are copied into the payload first. Does nothing when no Thermos executor
    /// is attached. On error the task is left unchanged.
    pub fn build_thermos_payload(&mut self) -> Result<&mut Self, TaskError> {
        let Some(mut thermos) = self.thermos.clone() else {
            return Ok(self);
        };

        thermos.task.resources = self.thermos_resources();
        let data = thermos.encode()?;

        self.thermos = Some(thermos);
        Ok(self.executor_data(data))
    }

    /// Wire representation of the task.
    pub fn task_config(&self) -> &TaskConfig {
        &self.config
    }

    pub fn into_task_config(self) -> TaskConfig {
        self.config
    }

    pub fn job_key(&self) -> JobKey {
        self.config.job.clone()
    }

    fn executor_mut(&mut self) -> &mut ExecutorConfig {
        self.config
            .executor_config
            .get_or_insert_with(ExecutorConfig::default)
    }

    fn set_resource(&mut self, resource: Resource) -> &mut Self {
        self.config.resources.retain(|r| !r.same_kind(&resource));
        self.config.resources.push(resource);
        self
    }

    fn thermos_resources(&self) -> ThermosResources {
        let mut out = ThermosResources::default();
        for r in &self.config.resources {
            match r {
                Resource::NumCpus(v) => out.cpu = Some(*v),
                Resource::RamMb(v) => out.ram = Some(*v),
                Resource::DiskMb(v) => out.disk = Some(*v),
                Resource::NumGpus(v) => out.gpu = Some(*v),
                Resource::NamedPort(_) => {}
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar_count(task: &AuroraTask) -> usize {
        task.task_config()
            .resources
            .iter()
            .filter(|r| r.port_name().is_none())
            .count()
    }

    #[test]
    fn scalar_resources_replace_previous_value() {
        let mut task = AuroraTask::new();
        task.cpu(1.0).cpu(2.5).ram(64).ram(128).disk(100);

        assert_eq!(scalar_count(&task), 3);
        assert!(task.task_config().resources.contains(&Resource::NumCpus(2.5)));
        assert!(task.task_config().resources.contains(&Resource::RamMb(128)));
    }

    #[test]
    fn add_ports_numbers_after_existing_ports() {
        let mut task = AuroraTask::new();
        task.add_named_ports(["http", "admin"]).add_ports(2);

        let ports: Vec<_> = task
            .task_config()
            .resources
            .iter()
            .filter_map(|r| r.port_name())
            .collect();
        assert_eq!(
            ports,
            [
                "http",
                "admin",
                "org.apache.aurora.port.2",
                "org.apache.aurora.port.3"
            ]
        );
        assert_eq!(task.port_count(), 4);
    }

    #[test]
    fn dedicated_constraint_joins_role_and_name() {
        let mut task = AuroraTask::new();
        task.add_dedicated_constraint("vagrant", "bar");

        let c = &task.task_config().constraints[0];
        assert_eq!(c.name, "dedicated");
        assert_eq!(
            c.constraint,
            TaskConstraint::Value {
                negated: false,
                values: vec!["vagrant/bar".to_string()],
            }
        );
    }

    #[test]
    fn job_key_reflects_identity_setters() {
        let mut task = AuroraTask::new();
        task.role("www-data").environment("prod").name("hello");
        assert_eq!(task.job_key(), JobKey::new("www-data", "prod", "hello"));
    }

    #[test]
    fn build_thermos_payload_copies_resources() {
        let mut exec = ThermosExecutor::new();
        exec.add_process(ThermosProcess::new("hello", "echo hello"));

        let mut task = AuroraTask::new();
        task.cpu(0.5).ram(64).disk(100).thermos_executor(exec);
        task.build_thermos_payload().unwrap();

        let executor = task.task_config().executor_config.as_ref().unwrap();
        assert_eq!(executor.name, THERMOS_EXECUTOR_NAME);

        let payload: ThermosExecutor = serde_json::from_str(&executor.data).unwrap();
        assert_eq!(payload.task.resources.cpu, Some(0.5));
        assert_eq!(payload.task.resources.ram, Some(64));
        assert_eq!(payload.task.resources.disk, Some(100));
        assert!(payload.task.processes.contains_key("hello"));
    }

    #[test]
    fn build_thermos_payload_without_thermos_is_noop() {
        let mut task = AuroraTask::new();
        task.executor_name("custom").executor_data("opaque");
        task.build_thermos_payload().unwrap();
        assert_eq!(
            task.task_config().executor_config.as_ref().unwrap().data,
            "opaque"
        );
    }

    #[test]
    fn failed_thermos_payload_leaves_task_unchanged() {
        let mut exec = ThermosExecutor::new();
        exec.process_order(["missing"]);

        let mut task = AuroraTask::new();
        task.thermos_executor(exec);
        let before = task.clone();

        assert!(task.build_thermos_payload().is_err());
        assert_eq!(task, before);
    }

    #[test]
    fn from_config_decodes_thermos_payload() {
        let mut exec = ThermosExecutor::new();
        exec.add_process(ThermosProcess::new("hello", "echo hello"));

        let mut task = AuroraTask::new();
        task.thermos_executor(exec).build_thermos_payload().unwrap();

        let copy = AuroraTask::from_config(task.task_config());
        assert!(copy.thermos().unwrap().task.processes.contains_key("hello"));
    }

    #[test]
    fn from_config_ignores_foreign_executor_data() {
        let mut task = AuroraTask::new();
        task.executor_name(THERMOS_EXECUTOR_NAME)
            .executor_data("not json");

        let copy = AuroraTask::from_config(task.task_config());
        assert!(copy.thermos().is_none());
        assert_eq!(copy.task_config(), task.task_config());
    }

    #[test]
    fn clone_is_independent() {
        let mut source = AuroraTask::new();
        source.name("a").add_label("k", "v");

        let mut copy = source.clone();
        copy.name("b").add_label("k2", "v2");

        assert_eq!(source.job_key().name, "a");
        assert_eq!(source.task_config().metadata.len(), 1);
        assert_eq!(copy.task_config().metadata.len(), 2);
    }
}
