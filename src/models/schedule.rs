//! Schedule (policy run output) model.
//!
//! A policy schedule is the full result of running one scheduling policy
//! over a patient table: one [`ScheduleResult`] per valid patient plus the
//! diagnostics for any rows that were skipped.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::PriorityClass;
use crate::error::RowDiagnostic;

/// Scheduling policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// First come, first served (by first-seen timestamp).
    Fcfs,
    /// Shortest job first (by record count).
    Sjf,
    /// Priority class, then shortest job.
    Priority,
    /// Preemptive round robin over a fixed order.
    RoundRobin,
}

impl Policy {
    /// All policies, in reporting order.
    pub const ALL: [Policy; 4] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
    ];

    /// Short policy name.
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::Priority => "PRIORITY",
            Policy::RoundRobin => "RR",
        }
    }

    /// Whether a patient may be interrupted before finishing.
    pub fn is_preemptive(&self) -> bool {
        matches!(self, Policy::RoundRobin)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One contiguous execution interval of a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlice {
    /// Clock value when the slice started.
    pub start: u64,
    /// Ticks executed in this slice.
    pub executed: u64,
    /// Burst left after this slice.
    pub remaining: u64,
}

impl TimeSlice {
    /// Clock value when the slice ended.
    #[inline]
    pub fn end(&self) -> u64 {
        self.start + self.executed
    }
}

/// Scheduling metrics for one patient under one policy.
///
/// Arrival is 0 for every patient, so turnaround equals completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Patient ID.
    pub id: String,
    /// Patient name.
    pub name: String,
    /// Burst time (record count).
    pub burst: u64,
    /// Clock value when the patient was first serviced.
    pub start_time: u64,
    /// Clock value when the patient's last slice ended.
    pub completion_time: u64,
    /// `completion_time - arrival` (arrival = 0).
    pub turnaround_time: u64,
    /// Ticks spent ready but not running.
    pub waiting_time: u64,
    /// Urgency class (priority policy only).
    pub priority_class: Option<PriorityClass>,
    /// Execution intervals in time order.
    pub slices: Vec<TimeSlice>,
}

impl ScheduleResult {
    /// Builds a run-to-completion result starting at `start`.
    pub fn run_to_completion(
        id: impl Into<String>,
        name: impl Into<String>,
        burst: u64,
        start: u64,
    ) -> Self {
        let end = start + burst;
        Self {
            id: id.into(),
            name: name.into(),
            burst,
            start_time: start,
            completion_time: end,
            turnaround_time: end,
            waiting_time: start,
            priority_class: None,
            slices: vec![TimeSlice {
                start,
                executed: burst,
                remaining: 0,
            }],
        }
    }

    /// Sets the priority class.
    pub fn with_priority_class(mut self, class: PriorityClass) -> Self {
        self.priority_class = Some(class);
        self
    }

    /// Alias for `completion_time` in run-to-completion tables.
    #[inline]
    pub fn end_time(&self) -> u64 {
        self.completion_time
    }

    /// Total ticks executed across all slices.
    pub fn executed(&self) -> u64 {
        self.slices.iter().map(|s| s.executed).sum()
    }

    /// Burst left after the last slice (0 for a finished patient).
    pub fn remaining(&self) -> u64 {
        self.slices.last().map(|s| s.remaining).unwrap_or(self.burst)
    }

    /// Number of times the patient was dispatched.
    pub fn slice_count(&self) -> usize {
        self.slices.len()
    }
}

/// Output of one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySchedule {
    /// Policy that produced this schedule.
    pub policy: Policy,
    /// Per-patient results, in execution order (input order for round robin).
    pub results: Vec<ScheduleResult>,
    /// Rows skipped during this run.
    pub diagnostics: Vec<RowDiagnostic>,
}

impl PolicySchedule {
    /// Creates an empty schedule for a policy.
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            results: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Adds a result.
    pub fn add_result(&mut self, result: ScheduleResult) {
        self.results.push(result);
    }

    /// Adds a diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: RowDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Makespan: latest completion time (0 when empty).
    pub fn makespan(&self) -> u64 {
        self.results
            .iter()
            .map(|r| r.completion_time)
            .max()
            .unwrap_or(0)
    }

    /// Sum of all scheduled bursts.
    pub fn total_burst(&self) -> u64 {
        self.results.iter().map(|r| r.burst).sum()
    }

    /// Finds the result for a patient.
    pub fn result_for(&self, patient_id: &str) -> Option<&ScheduleResult> {
        self.results.iter().find(|r| r.id == patient_id)
    }

    /// Patient IDs in result order.
    pub fn order(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.id.as_str()).collect()
    }

    /// Whether any rows were skipped.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of scheduled patients.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
