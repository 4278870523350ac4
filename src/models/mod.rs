//! Triage scheduling domain models.
//!
//! Provides the input rows (patient summaries), the derived urgency class,
//! and the per-policy output types.
//!
//! # Domain Mappings
//!
//! | u-triage | CPU scheduling |
//! |----------|----------------|
//! | PatientSummary | Process |
//! | record_count | Burst time |
//! | PriorityClass | Process priority |
//! | PolicySchedule | Gantt chart + metrics |

mod patient;
mod schedule;

pub use patient::{PatientStatus, PatientSummary, PriorityClass};
pub use schedule::{Policy, PolicySchedule, ScheduleResult, TimeSlice};
