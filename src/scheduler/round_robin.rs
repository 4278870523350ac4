//! Round robin over a fixed patient order.
//!
//! # Algorithm
//!
//! State is index-addressed: `remaining[i]`, `waiting[i]`, one clock.
//! Each sweep visits patients in input order:
//!
//! 1. Skip `i` if `remaining[i] == 0` (no time cost).
//! 2. `exec = min(quantum, remaining[i])`.
//! 3. Every other `j` with `remaining[j] > 0` accrues `waiting[j] += exec`.
//! 4. `clock += exec`, `remaining[i] -= exec`; completion is recorded when
//!    `remaining[i]` reaches 0.
//!
//! Sweeps repeat until every patient completes. There is no ready queue:
//! a patient is never re-inserted, it is simply visited again on the next
//! sweep. Each visit strictly decreases total remaining work, so the loop
//! terminates.
//!
//! # Complexity
//! O(S · n²) where S is the number of sweeps (⌈max burst / quantum⌉).

use tracing::{debug, info_span, trace};

use super::PolicyScheduler;
use crate::error::RowDiagnostic;
use crate::models::{PatientSummary, Policy, PolicySchedule, ScheduleResult, TimeSlice};

/// Default time quantum (record units).
pub const DEFAULT_QUANTUM: u64 = 2;

/// Preemptive round-robin scheduler.
///
/// # Example
///
/// ```
/// use u_triage::models::PatientSummary;
/// use u_triage::scheduler::{PolicyScheduler, RoundRobinScheduler};
///
/// let patients = vec![
///     PatientSummary::new("A").with_record_count(4),
///     PatientSummary::new("B").with_record_count(3),
/// ];
/// let schedule = RoundRobinScheduler::new().schedule(&patients);
/// let a = schedule.result_for("A").unwrap();
/// let b = schedule.result_for("B").unwrap();
/// assert_eq!((a.completion_time, a.waiting_time), (6, 2));
/// assert_eq!((b.completion_time, b.waiting_time), (7, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobinScheduler {
    quantum: u64,
}

impl RoundRobinScheduler {
    /// Creates a scheduler with the default quantum.
    pub fn new() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
        }
    }

    /// Sets the quantum. Zero is raised to 1.
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.quantum = quantum.max(1);
        self
    }

    /// The time quantum.
    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyScheduler for RoundRobinScheduler {
    fn policy(&self) -> Policy {
        Policy::RoundRobin
    }

    fn schedule(&self, patients: &[PatientSummary]) -> PolicySchedule {
        let _span = info_span!("schedule", policy = %Policy::RoundRobin, quantum = self.quantum)
            .entered();
        let mut schedule = PolicySchedule::new(Policy::RoundRobin);

        let n = patients.len();
        let mut remaining: Vec<u64> = Vec::with_capacity(n);
        for (index, patient) in patients.iter().enumerate() {
            if !patient.is_schedulable() {
                debug!(patient = %patient.id, "skipping patient with no records");
                schedule.add_diagnostic(RowDiagnostic::zero_burst(index, &patient.id));
            }
            remaining.push(patient.burst());
        }

        let total = remaining.iter().filter(|&&r| r > 0).count();
        let mut waiting = vec![0u64; n];
        let mut completion: Vec<Option<u64>> = vec![None; n];
        let mut slices: Vec<Vec<TimeSlice>> = vec![Vec::new(); n];
        let mut clock: u64 = 0;
        let mut completed = 0usize;
        let mut sweeps = 0usize;

        while completed < total {
            sweeps += 1;
            for i in 0..n {
                if remaining[i] == 0 {
                    continue;
                }

                let exec = self.quantum.min(remaining[i]);
                for j in 0..n {
                    if j != i && remaining[j] > 0 {
                        waiting[j] += exec;
                    }
                }

                slices[i].push(TimeSlice {
                    start: clock,
                    executed: exec,
                    remaining: remaining[i] - exec,
                });
                clock += exec;
                remaining[i] -= exec;
                trace!(patient = %patients[i].id, exec, clock, left = remaining[i], "slice");

                if remaining[i] == 0 {
                    completion[i] = Some(clock);
                    completed += 1;
                }
            }
        }

        for (i, patient) in patients.iter().enumerate() {
            let Some(done) = completion[i] else {
                continue;
            };
            let patient_slices = std::mem::take(&mut slices[i]);
            let start_time = patient_slices.first().map(|s| s.start).unwrap_or(0);
            schedule.add_result(ScheduleResult {
                id: patient.id.clone(),
                name: patient.name.clone(),
                burst: patient.burst(),
                start_time,
                completion_time: done,
                turnaround_time: done,
                waiting_time: waiting[i],
                priority_class: None,
                slices: patient_slices,
            });
        }

        debug!(
            patients = schedule.len(),
            skipped = schedule.diagnostics.len(),
            sweeps,
            makespan = clock,
            "policy run complete"
        );
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn patient(id: &str, count: u32) -> PatientSummary {
        PatientSummary::new(id).with_record_count(count)
    }

    fn executed(result: &ScheduleResult) -> Vec<u64> {
        result.slices.iter().map(|s| s.executed).collect()
    }

    #[test]
    fn test_single_patient() {
        let s = RoundRobinScheduler::new().schedule(&[patient("A", 5)]);
        let a = s.result_for("A").unwrap();
        assert_eq!(executed(a), vec![2, 2, 1]);
        assert_eq!(a.completion_time, 5);
        assert_eq!(a.turnaround_time, 5);
        assert_eq!(a.waiting_time, 0);
        assert_eq!(a.remaining(), 0);
    }

    #[test]
    fn test_two_patients() {
        let s = RoundRobinScheduler::new().schedule(&[patient("A", 4), patient("B", 3)]);
        let a = s.result_for("A").unwrap();
        let b = s.result_for("B").unwrap();

        assert_eq!(a.completion_time, 6);
        assert_eq!(b.completion_time, 7);
        assert_eq!(a.waiting_time, 2);
        assert_eq!(b.waiting_time, 4);

        let a_starts: Vec<u64> = a.slices.iter().map(|s| s.start).collect();
        let b_starts: Vec<u64> = b.slices.iter().map(|s| s.start).collect();
        assert_eq!(a_starts, vec![0, 4]);
        assert_eq!(b_starts, vec![2, 6]);
        assert_eq!(executed(b), vec![2, 1]);
        assert_eq!(s.makespan(), 7);
    }

    #[test]
    fn test_finished_patients_skipped_without_cost() {
        // A finishes in sweep 1; later sweeps only visit B and C
        let s = RoundRobinScheduler::new().schedule(&[
            patient("A", 1),
            patient("B", 5),
            patient("C", 3),
        ]);
        let a = s.result_for("A").unwrap();
        let b = s.result_for("B").unwrap();
        let c = s.result_for("C").unwrap();

        // Sweep 1: A 0..1, B 1..3, C 3..5; sweep 2: B 5..7, C 7..8; sweep 3: B 8..9
        assert_eq!(a.completion_time, 1);
        assert_eq!(c.completion_time, 8);
        assert_eq!(b.completion_time, 9);
        assert_eq!(a.waiting_time, 0);
        assert_eq!(b.waiting_time, 4);
        assert_eq!(c.waiting_time, 5);
        assert_eq!(executed(b), vec![2, 2, 1]);
    }

    #[test]
    fn test_results_in_input_order() {
        let s = RoundRobinScheduler::new().schedule(&[patient("Z", 6), patient("Y", 1)]);
        assert_eq!(s.order(), vec!["Z", "Y"]);
        assert_eq!(s.result_for("Y").unwrap().start_time, 2);
    }

    #[test]
    fn test_custom_quantum() {
        let s = RoundRobinScheduler::new()
            .with_quantum(3)
            .schedule(&[patient("A", 4), patient("B", 3)]);
        // A 0..3, B 3..6 (done), A 6..7 (done)
        assert_eq!(s.result_for("A").unwrap().completion_time, 7);
        assert_eq!(s.result_for("B").unwrap().completion_time, 6);
        assert_eq!(s.result_for("A").unwrap().waiting_time, 3);
        assert_eq!(s.result_for("B").unwrap().waiting_time, 3);
    }

    #[test]
    fn test_zero_quantum_clamped() {
        let rr = RoundRobinScheduler::new().with_quantum(0);
        assert_eq!(rr.quantum(), 1);
        let s = rr.schedule(&[patient("A", 3)]);
        assert_eq!(s.result_for("A").unwrap().slice_count(), 3);
    }

    #[test]
    fn test_zero_burst_skipped_with_diagnostic() {
        let s = RoundRobinScheduler::new().schedule(&[patient("A", 2), patient("Z", 0)]);
        assert_eq!(s.order(), vec!["A"]);
        assert_eq!(s.diagnostics.len(), 1);
        assert_eq!(s.diagnostics[0].patient_id.as_deref(), Some("Z"));
    }

    #[test]
    fn test_empty_input() {
        let s = RoundRobinScheduler::new().schedule(&[]);
        assert!(s.is_empty());
        assert!(!s.has_diagnostics());
    }

    #[test]
    fn test_invariants_on_random_input() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 3, 8, 30] {
            let patients: Vec<PatientSummary> = (0..n)
                .map(|i| patient(&format!("P{i}"), rng.random_range(1..=15)))
                .collect();
            let total: u64 = patients.iter().map(|p| p.burst()).sum();

            let s = RoundRobinScheduler::new().schedule(&patients);
            assert_eq!(s.len(), n);
            assert_eq!(s.makespan(), total);
            for r in &s.results {
                assert_eq!(r.executed(), r.burst);
                assert_eq!(r.remaining(), 0);
                assert!(r.slices.iter().all(|sl| sl.executed <= DEFAULT_QUANTUM));
                // All patients are ready at t=0, so idle ticks = turnaround - burst
                assert_eq!(r.waiting_time, r.turnaround_time - r.burst);
            }
        }
    }

    #[test]
    fn test_idempotent() {
        let patients = vec![patient("A", 7), patient("B", 2), patient("C", 5)];
        let rr = RoundRobinScheduler::new();
        assert_eq!(rr.schedule(&patients), rr.schedule(&patients));
    }
}
