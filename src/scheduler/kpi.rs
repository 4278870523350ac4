//! Schedule quality metrics (KPIs).
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion time |
//! | Total burst | Sum of scheduled bursts |
//! | Avg waiting | Mean ticks spent ready but not running |
//! | Max waiting | Longest single wait |
//! | Avg turnaround | Mean completion time (arrival = 0) |
//!
//! All averages are 0.0 for an empty schedule.

use serde::{Deserialize, Serialize};

use crate::models::PolicySchedule;

/// Performance indicators for one policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleKpi {
    /// Number of scheduled patients.
    pub patient_count: usize,
    /// Latest completion time.
    pub makespan: u64,
    /// Sum of scheduled bursts.
    pub total_burst: u64,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Longest waiting time.
    pub max_waiting: u64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a policy schedule.
    pub fn calculate(schedule: &PolicySchedule) -> Self {
        let patient_count = schedule.len();
        let total_waiting: u64 = schedule.results.iter().map(|r| r.waiting_time).sum();
        let total_turnaround: u64 = schedule.results.iter().map(|r| r.turnaround_time).sum();
        let max_waiting = schedule
            .results
            .iter()
            .map(|r| r.waiting_time)
            .max()
            .unwrap_or(0);

        let (avg_waiting, avg_turnaround) = if patient_count == 0 {
            (0.0, 0.0)
        } else {
            (
                total_waiting as f64 / patient_count as f64,
                total_turnaround as f64 / patient_count as f64,
            )
        };

        Self {
            patient_count,
            makespan: schedule.makespan(),
            total_burst: schedule.total_burst(),
            avg_waiting,
            max_waiting,
            avg_turnaround,
        }
    }
}
