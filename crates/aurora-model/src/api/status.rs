use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a single task instance as reported by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    /// Initial state for a task not yet known to the scheduler's storage.
    Init,
    /// Task is delayed by a penalty before it may be scheduled again.
    Throttled,
    /// Task is waiting to be matched with a host offer.
    Pending,
    /// Task was assigned to an agent but not yet launched.
    Assigned,
    Starting,
    Running,
    Finished,
    /// Task is being killed to make room for a higher-priority task.
    Preempting,
    Restarting,
    /// Task is being killed because its host is draining.
    Draining,
    /// Agent running the task is partitioned from the scheduler.
    Partitioned,
    Failed,
    Killed,
    Killing,
    Lost,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 15] = [
        ScheduleStatus::Init,
        ScheduleStatus::Throttled,
        ScheduleStatus::Pending,
        ScheduleStatus::Assigned,
        ScheduleStatus::Starting,
        ScheduleStatus::Running,
        ScheduleStatus::Finished,
        ScheduleStatus::Preempting,
        ScheduleStatus::Restarting,
        ScheduleStatus::Draining,
        ScheduleStatus::Partitioned,
        ScheduleStatus::Failed,
        ScheduleStatus::Killed,
        ScheduleStatus::Killing,
        ScheduleStatus::Lost,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Init => "INIT",
            ScheduleStatus::Throttled => "THROTTLED",
            ScheduleStatus::Pending => "PENDING",
            ScheduleStatus::Assigned => "ASSIGNED",
            ScheduleStatus::Starting => "STARTING",
            ScheduleStatus::Running => "RUNNING",
            ScheduleStatus::Finished => "FINISHED",
            ScheduleStatus::Preempting => "PREEMPTING",
            ScheduleStatus::Restarting => "RESTARTING",
            ScheduleStatus::Draining => "DRAINING",
            ScheduleStatus::Partitioned => "PARTITIONED",
            ScheduleStatus::Failed => "FAILED",
            ScheduleStatus::Killed => "KILLED",
            ScheduleStatus::Killing => "KILLING",
            ScheduleStatus::Lost => "LOST",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a job update as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobUpdateStatus {
    RollingForward,
    RollingBack,
    RollForwardPaused,
    RollBackPaused,
    RolledForward,
    RolledBack,
    Aborted,
    Error,
    Failed,
    /// Update is blocked until the next pulse arrives.
    RollForwardAwaitingPulse,
    RollBackAwaitingPulse,
}

impl JobUpdateStatus {
    pub const ALL: [JobUpdateStatus; 11] = [
        JobUpdateStatus::RollingForward,
        JobUpdateStatus::RollingBack,
        JobUpdateStatus::RollForwardPaused,
        JobUpdateStatus::RollBackPaused,
        JobUpdateStatus::RolledForward,
        JobUpdateStatus::RolledBack,
        JobUpdateStatus::Aborted,
        JobUpdateStatus::Error,
        JobUpdateStatus::Failed,
        JobUpdateStatus::RollForwardAwaitingPulse,
        JobUpdateStatus::RollBackAwaitingPulse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobUpdateStatus::RollingForward => "ROLLING_FORWARD",
            JobUpdateStatus::RollingBack => "ROLLING_BACK",
            JobUpdateStatus::RollForwardPaused => "ROLL_FORWARD_PAUSED",
            JobUpdateStatus::RollBackPaused => "ROLL_BACK_PAUSED",
            JobUpdateStatus::RolledForward => "ROLLED_FORWARD",
            JobUpdateStatus::RolledBack => "ROLLED_BACK",
            JobUpdateStatus::Aborted => "ABORTED",
            JobUpdateStatus::Error => "ERROR",
            JobUpdateStatus::Failed => "FAILED",
            JobUpdateStatus::RollForwardAwaitingPulse => "ROLL_FORWARD_AWAITING_PULSE",
            JobUpdateStatus::RollBackAwaitingPulse => "ROLL_BACK_AWAITING_PULSE",
        }
    }
}

impl fmt::Display for JobUpdateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Source lists as published by the scheduler API. Lookup tables are derived from these.

pub const ACTIVE_STATES: &[ScheduleStatus] = &[
    ScheduleStatus::Assigned,
    ScheduleStatus::Draining,
    ScheduleStatus::Killing,
    ScheduleStatus::Partitioned,
    ScheduleStatus::Pending,
    ScheduleStatus::Preempting,
    ScheduleStatus::Restarting,
    ScheduleStatus::Running,
    ScheduleStatus::Starting,
    ScheduleStatus::Throttled,
];

pub const SLAVE_ASSIGNED_STATES: &[ScheduleStatus] = &[
    ScheduleStatus::Assigned,
    ScheduleStatus::Draining,
    ScheduleStatus::Killing,
    ScheduleStatus::Partitioned,
    ScheduleStatus::Preempting,
    ScheduleStatus::Restarting,
    ScheduleStatus::Running,
    ScheduleStatus::Starting,
];

pub const LIVE_STATES: &[ScheduleStatus] = &[
    ScheduleStatus::Killing,
    ScheduleStatus::Partitioned,
    ScheduleStatus::Preempting,
    ScheduleStatus::Draining,
    ScheduleStatus::Restarting,
    ScheduleStatus::Running,
];

pub const TERMINAL_STATES: &[ScheduleStatus] = &[
    ScheduleStatus::Failed,
    ScheduleStatus::Finished,
    ScheduleStatus::Killed,
    ScheduleStatus::Lost,
];

pub const ACTIVE_JOB_UPDATE_STATES: &[JobUpdateStatus] = &[
    JobUpdateStatus::RollingForward,
    JobUpdateStatus::RollingBack,
    JobUpdateStatus::RollForwardPaused,
    JobUpdateStatus::RollBackPaused,
    JobUpdateStatus::RollForwardAwaitingPulse,
    JobUpdateStatus::RollBackAwaitingPulse,
];

pub const AWAITING_PULSE_JOB_UPDATE_STATES: &[JobUpdateStatus] = &[
    JobUpdateStatus::RollForwardAwaitingPulse,
    JobUpdateStatus::RollBackAwaitingPulse,
];

/// States an update may finish in.
pub const TERMINAL_UPDATE_STATES: &[JobUpdateStatus] = &[
    JobUpdateStatus::RolledForward,
    JobUpdateStatus::RolledBack,
    JobUpdateStatus::Aborted,
    JobUpdateStatus::Error,
    JobUpdateStatus::Failed,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_wire_names() {
        for status in ScheduleStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for status in JobUpdateStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn slave_assigned_is_subset_of_active() {
        assert!(SLAVE_ASSIGNED_STATES.iter().all(|s| ACTIVE_STATES.contains(s)));
        assert!(LIVE_STATES.iter().all(|s| SLAVE_ASSIGNED_STATES.contains(s)));
    }

    #[test]
    fn terminal_and_active_are_disjoint() {
        assert!(TERMINAL_STATES.iter().all(|s| !ACTIVE_STATES.contains(s)));
        assert!(
            TERMINAL_UPDATE_STATES
                .iter()
                .all(|s| !ACTIVE_JOB_UPDATE_STATES.contains(s))
        );
    }
}
