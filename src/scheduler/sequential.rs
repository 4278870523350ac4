//! Run-to-completion scheduler shared by FCFS, SJF and Priority.
//!
//! # Algorithm
//!
//! 1. Order patients with the policy's rule engine.
//! 2. Fold over that order with a clock starting at 0:
//!    `start = clock`, `end = start + burst`, `turnaround = end`,
//!    `waiting = start`, `clock = end`.
//!
//! Arrival is 0 for every patient.
//!
//! # Complexity
//! O(n log n) for the sort, O(n) for the fold.

use tracing::{debug, info_span};

use super::PolicyScheduler;
use crate::error::RowDiagnostic;
use crate::models::{PatientSummary, Policy, PolicySchedule, ScheduleResult};
use crate::ordering::{rules, RuleEngine};

/// Non-preemptive scheduler: a policy label plus an ordering.
///
/// # Example
///
/// ```
/// use u_triage::models::PatientSummary;
/// use u_triage::scheduler::{PolicyScheduler, SequentialScheduler};
///
/// let patients = vec![
///     PatientSummary::new("P1").with_record_count(6),
///     PatientSummary::new("P2").with_record_count(2),
/// ];
/// let schedule = SequentialScheduler::sjf().schedule(&patients);
/// assert_eq!(schedule.order(), vec!["P2", "P1"]);
/// assert_eq!(schedule.makespan(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct SequentialScheduler {
    policy: Policy,
    engine: RuleEngine,
}

impl SequentialScheduler {
    /// Creates a scheduler with a custom ordering.
    pub fn new(policy: Policy, engine: RuleEngine) -> Self {
        Self { policy, engine }
    }

    /// First come, first served: earliest first-seen timestamp first.
    pub fn fcfs() -> Self {
        Self::new(Policy::Fcfs, RuleEngine::new().with_rule(rules::Arrival))
    }

    /// Shortest job first: fewest records first.
    pub fn sjf() -> Self {
        Self::new(Policy::Sjf, RuleEngine::new().with_rule(rules::ShortestBurst))
    }

    /// Priority: most urgent class first, shortest job within a class.
    pub fn priority() -> Self {
        Self::new(
            Policy::Priority,
            RuleEngine::new()
                .with_rule(rules::Urgency)
                .with_rule(rules::ShortestBurst),
        )
    }

    /// The ordering used by this scheduler.
    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }
}

impl PolicyScheduler for SequentialScheduler {
    fn policy(&self) -> Policy {
        self.policy
    }

    fn schedule(&self, patients: &[PatientSummary]) -> PolicySchedule {
        let _span = info_span!("schedule", policy = %self.policy).entered();
        let mut schedule = PolicySchedule::new(self.policy);

        for (index, patient) in patients.iter().enumerate() {
            if !patient.is_schedulable() {
                debug!(patient = %patient.id, "skipping patient with no records");
                schedule.add_diagnostic(RowDiagnostic::zero_burst(index, &patient.id));
            }
        }

        let mut clock: u64 = 0;
        for candidate in self.engine.sort(patients) {
            let patient = candidate.patient;
            if !patient.is_schedulable() {
                continue;
            }

            let mut result =
                ScheduleResult::run_to_completion(&patient.id, &patient.name, patient.burst(), clock);
            if let Some(class) = candidate.class {
                result = result.with_priority_class(class);
            }

            clock = result.completion_time;
            schedule.add_result(result);
        }

        debug!(
            patients = schedule.len(),
            skipped = schedule.diagnostics.len(),
            makespan = clock,
            "policy run complete"
        );
        schedule
    }
}
