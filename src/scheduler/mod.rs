//! Scheduling policies and KPI evaluation.
//!
//! # Policies
//!
//! - `SequentialScheduler`: run-to-completion fold shared by FCFS, SJF and
//!   Priority; the policies differ only in ordering.
//! - `RoundRobinScheduler`: preemptive, fixed quantum, sweeps the input in
//!   a fixed order.
//!
//! Every policy is a pure function of the input slice. Nothing is shared
//! between runs except the read-only patient rows.
//!
//! # KPI
//!
//! `ScheduleKpi` summarizes a run: makespan, average and maximum waiting,
//! average turnaround.

mod kpi;
mod round_robin;
mod sequential;

pub use kpi::ScheduleKpi;
pub use round_robin::{RoundRobinScheduler, DEFAULT_QUANTUM};
pub use sequential::SequentialScheduler;

use crate::models::{PatientSummary, Policy, PolicySchedule};

/// A scheduling policy that can be run over a patient table.
pub trait PolicyScheduler: Send + Sync {
    /// Policy implemented by this scheduler.
    fn policy(&self) -> Policy;

    /// Runs the policy over `patients`.
    ///
    /// Patients with no records are skipped and reported in
    /// `PolicySchedule::diagnostics`. Empty input yields an empty schedule.
    fn schedule(&self, patients: &[PatientSummary]) -> PolicySchedule;
}

/// Builds the scheduler for a policy.
pub fn scheduler_for(policy: Policy, quantum: u64) -> Box<dyn PolicyScheduler> {
    match policy {
        Policy::Fcfs => Box::new(SequentialScheduler::fcfs()),
        Policy::Sjf => Box::new(SequentialScheduler::sjf()),
        Policy::Priority => Box::new(SequentialScheduler::priority()),
        Policy::RoundRobin => Box::new(RoundRobinScheduler::new().with_quantum(quantum)),
    }
}
