use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::task::error::TaskError;

/// Executor name the scheduler uses for Thermos-managed tasks.
pub const THERMOS_EXECUTOR_NAME: &str = "AuroraExecutor";

/// Thermos executor payload, serialized as JSON into the task's executor data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermosExecutor {
    pub task: ThermosTask,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermosTask {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub processes: BTreeMap<String, ThermosProcess>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<ThermosConstraint>,
    #[serde(default)]
    pub resources: ThermosResources,
}

/// Orders processes inside the sandbox: each one starts after the previous exits successfully.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermosConstraint {
    pub order: Vec<String>,
}

/// Resources mirrored from the task so the executor can enforce them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThermosResources {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ram: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThermosProcess {
    pub name: String,
    pub cmdline: String,
    #[serde(default)]
    pub daemon: bool,
    #[serde(default)]
    pub ephemeral: bool,
    pub max_failures: i32,
    /// Seconds a process must run before a restart is not counted as a failure.
    pub min_duration: i32,
    #[serde(default)]
    pub r#final: bool,
}

impl ThermosProcess {
    pub fn new(name: impl Into<String>, cmdline: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cmdline: cmdline.into(),
            daemon: false,
            ephemeral: false,
            max_failures: 1,
            min_duration: 5,
            r#final: false,
        }
    }
}

impl ThermosExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process, replacing any previous process with the same name.
    pub fn add_process(&mut self, process: ThermosProcess) -> &mut Self {
        self.task.processes.insert(process.name.clone(), process);
        self
    }

    /// Require the named processes to run one after another.
    pub fn process_order<I, S>(&mut self, order: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.task.constraints.push(ThermosConstraint {
            order: order.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Encode the payload, rejecting ordering constraints that name missing processes.
    pub(crate) fn encode(&self) -> Result<String, TaskError> {
        let unknown = self
            .task
            .constraints
            .iter()
            .flat_map(|c| c.order.iter())
            .find(|name| !self.task.processes.contains_key(*name));
        if let Some(name) = unknown {
            return Err(TaskError::UnknownProcess(name.clone()));
        }
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_rejects_unknown_process_in_order() {
        let mut exec = ThermosExecutor::new();
        exec.add_process(ThermosProcess::new("fetch", "curl -O pkg"))
            .process_order(["fetch", "run"]);

        let err = exec.encode().unwrap_err();
        assert!(matches!(err, TaskError::UnknownProcess(ref n) if n == "run"));
    }

    #[test]
    fn encode_decode_preserves_processes() {
        let mut exec = ThermosExecutor::new();
        exec.add_process(ThermosProcess::new("fetch", "curl -O pkg"))
            .add_process(ThermosProcess::new("run", "./pkg"))
            .process_order(["fetch", "run"]);

        let json = exec.encode().unwrap();
        assert!(json.contains("\"final\":false"));

        let back: ThermosExecutor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exec);
    }
}
