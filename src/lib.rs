//! Patient triage scheduling simulations.
//!
//! Takes per-patient vital-sign summaries and runs them through four
//! classic CPU-scheduling policies, treating each patient's record count
//! as its burst time.
//!
//! # Modules
//!
//! - **`models`**: `PatientSummary`, `PriorityClass`, `ScheduleResult`,
//!   `PolicySchedule`
//! - **`table`**: summary table ingestion with per-row diagnostics
//! - **`triage`**: priority classification from status and vital thresholds
//! - **`ordering`**: composable ordering rules for the non-preemptive policies
//! - **`scheduler`**: FCFS / SJF / Priority (shared timing model) and
//!   Round Robin, plus KPIs
//! - **`simulation`**: runs several policies over one snapshot
//! - **`report`**: fixed-width text rendering
//!
//! # Timing Model
//!
//! Every patient arrives at t=0. Turnaround equals completion time.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

pub mod error;
pub mod models;
pub mod ordering;
pub mod report;
pub mod scheduler;
pub mod simulation;
pub mod table;
pub mod triage;

pub use error::{DiagnosticKind, Result, RowDiagnostic, RowError, TableError};
