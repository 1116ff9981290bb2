//! Membership tables for the scheduler's status groupings.
//!
//! Built once from the source lists in [`aurora_model`] on first use and never modified
//! afterwards, so lookups need no synchronization.
use std::{collections::HashSet, sync::OnceLock};

use aurora_model::{
    ACTIVE_JOB_UPDATE_STATES, ACTIVE_STATES, AWAITING_PULSE_JOB_UPDATE_STATES, JobUpdateStatus,
    LIVE_STATES, SLAVE_ASSIGNED_STATES, ScheduleStatus, TERMINAL_STATES, TERMINAL_UPDATE_STATES,
};

static TABLES: OnceLock<StatusTables> = OnceLock::new();

struct StatusTables {
    active: HashSet<ScheduleStatus>,
    slave_assigned: HashSet<ScheduleStatus>,
    live: HashSet<ScheduleStatus>,
    terminal: HashSet<ScheduleStatus>,
    active_update: HashSet<JobUpdateStatus>,
    awaiting_pulse: HashSet<JobUpdateStatus>,
}

impl StatusTables {
    fn build() -> Self {
        Self {
            active: ACTIVE_STATES.iter().copied().collect(),
            slave_assigned: SLAVE_ASSIGNED_STATES.iter().copied().collect(),
            live: LIVE_STATES.iter().copied().collect(),
            terminal: TERMINAL_STATES.iter().copied().collect(),
            active_update: ACTIVE_JOB_UPDATE_STATES.iter().copied().collect(),
            awaiting_pulse: AWAITING_PULSE_JOB_UPDATE_STATES.iter().copied().collect(),
        }
    }
}

#[inline]
fn tables() -> &'static StatusTables {
    TABLES.get_or_init(StatusTables::build)
}

/// Build the tables eagerly, e.g. during process startup. Later calls are no-ops.
pub fn init_status_tables() {
    tables();
}

pub fn active_states() -> &'static HashSet<ScheduleStatus> {
    &tables().active
}

/// States in which the task has been placed on an agent.
pub fn slave_assigned_states() -> &'static HashSet<ScheduleStatus> {
    &tables().slave_assigned
}

pub fn live_states() -> &'static HashSet<ScheduleStatus> {
    &tables().live
}

pub fn terminal_states() -> &'static HashSet<ScheduleStatus> {
    &tables().terminal
}

pub fn active_job_update_states() -> &'static HashSet<JobUpdateStatus> {
    &tables().active_update
}

pub fn awaiting_pulse_job_update_states() -> &'static HashSet<JobUpdateStatus> {
    &tables().awaiting_pulse
}

/// All states an update may finish in.
///
/// Returns a fresh vector each call so no caller can alter the list seen by others.
pub fn terminal_update_states() -> Vec<JobUpdateStatus> {
    TERMINAL_UPDATE_STATES.to_vec()
}

/// Status-group predicates for [`ScheduleStatus`].
pub trait ScheduleStatusExt {
    fn is_active(&self) -> bool;
    fn is_slave_assigned(&self) -> bool;
    fn is_live(&self) -> bool;
    fn is_terminal(&self) -> bool;
}

impl ScheduleStatusExt for ScheduleStatus {
    #[inline]
    fn is_active(&self) -> bool {
        active_states().contains(self)
    }
    #[inline]
    fn is_slave_assigned(&self) -> bool {
        slave_assigned_states().contains(self)
    }
    #[inline]
    fn is_live(&self) -> bool {
        live_states().contains(self)
    }
    #[inline]
    fn is_terminal(&self) -> bool {
        terminal_states().contains(self)
    }
}

/// Status-group predicates for [`JobUpdateStatus`].
pub trait JobUpdateStatusExt {
    fn is_active(&self) -> bool;
    fn is_awaiting_pulse(&self) -> bool;
    fn is_terminal(&self) -> bool;
}

impl JobUpdateStatusExt for JobUpdateStatus {
    #[inline]
    fn is_active(&self) -> bool {
        active_job_update_states().contains(self)
    }
    #[inline]
    fn is_awaiting_pulse(&self) -> bool {
        awaiting_pulse_job_update_states().contains(self)
    }
    #[inline]
    fn is_terminal(&self) -> bool {
        TERMINAL_UPDATE_STATES.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<T>(table: &HashSet<T>, source: &[T], all: &[T])
    where
        T: std::hash::Hash + Eq + std::fmt::Debug,
    {
        for s in all {
            assert_eq!(table.contains(s), source.contains(s), "{s:?}");
        }
    }

    #[test]
    fn schedule_tables_match_source_lists() {
        let all = ScheduleStatus::ALL;
        check(active_states(), ACTIVE_STATES, &all);
        check(slave_assigned_states(), SLAVE_ASSIGNED_STATES, &all);
        check(live_states(), LIVE_STATES, &all);
        check(terminal_states(), TERMINAL_STATES, &all);
    }

    #[test]
    fn update_tables_match_source_lists() {
        let all = JobUpdateStatus::ALL;
        check(active_job_update_states(), ACTIVE_JOB_UPDATE_STATES, &all);
        check(
            awaiting_pulse_job_update_states(),
            AWAITING_PULSE_JOB_UPDATE_STATES,
            &all,
        );
    }

    #[test]
    fn init_is_idempotent() {
        init_status_tables();
        let first = active_states() as *const _;
        init_status_tables();
        assert_eq!(first, active_states() as *const _);
    }

    #[test]
    fn schedule_predicates() {
        assert!(ScheduleStatus::Running.is_active());
        assert!(ScheduleStatus::Running.is_live());
        assert!(ScheduleStatus::Pending.is_active());
        assert!(!ScheduleStatus::Pending.is_slave_assigned());
        assert!(ScheduleStatus::Lost.is_terminal());
        assert!(!ScheduleStatus::Init.is_active());
        assert!(!ScheduleStatus::Init.is_terminal());
    }

    #[test]
    fn update_predicates() {
        assert!(JobUpdateStatus::RollForwardAwaitingPulse.is_active());
        assert!(JobUpdateStatus::RollForwardAwaitingPulse.is_awaiting_pulse());
        assert!(!JobUpdateStatus::RollingForward.is_awaiting_pulse());
        assert!(JobUpdateStatus::Aborted.is_terminal());
        assert!(!JobUpdateStatus::RollBackPaused.is_terminal());
    }

    #[test]
    fn update_terminal_predicate_matches_source_list() {
        for status in JobUpdateStatus::ALL {
            assert_eq!(
                status.is_terminal(),
                TERMINAL_UPDATE_STATES.contains(&status),
                "{status:?}"
            );
        }
        assert_eq!(terminal_update_states(), TERMINAL_UPDATE_STATES);
    }

    #[test]
    fn terminal_update_states_are_not_active() {
        let terminal = terminal_update_states();
        assert_eq!(terminal.len(), 5);
        assert!(terminal.iter().all(|s| s.is_terminal() && !s.is_active()));
    }
}
