//! Fixed-width text rendering of policy runs.
//!
//! Layout is presentation only; the numeric fields on
//! [`ScheduleResult`](crate::models::ScheduleResult) are the contract.

use std::fmt;

use crate::models::{PolicySchedule, ScheduleResult};
use crate::scheduler::ScheduleKpi;
use crate::simulation::SimulationReport;

const ID_WIDTH: usize = 10;
const NAME_WIDTH: usize = 20;
const NUM_WIDTH: usize = 10;

impl fmt::Display for PolicySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preemptive = self.policy.is_preemptive();
        let end_label = if preemptive { "Complete" } else { "End" };
        let extra_label = if preemptive { "Slices" } else { "Class" };

        writeln!(f, "=== {} ===", self.policy)?;
        writeln!(
            f,
            "{:<iw$} {:<nw$} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$}",
            "ID",
            "Name",
            "Burst",
            "Start",
            end_label,
            "Turnaround",
            "Waiting",
            extra_label,
            iw = ID_WIDTH,
            nw = NAME_WIDTH,
            w = NUM_WIDTH,
        )?;
        writeln!(f, "{}", "-".repeat(ID_WIDTH + NAME_WIDTH + 6 * (NUM_WIDTH + 1) + 1))?;

        for r in &self.results {
            writeln!(f, "{}", ResultRow { result: r, preemptive })?;
        }

        let kpi = ScheduleKpi::calculate(self);
        writeln!(
            f,
            "Average waiting: {:.2}  Average turnaround: {:.2}  Makespan: {}",
            kpi.avg_waiting, kpi.avg_turnaround, kpi.makespan
        )?;
        if self.has_diagnostics() {
            writeln!(f, "Skipped rows: {}", self.diagnostics.len())?;
        }
        Ok(())
    }
}

struct ResultRow<'a> {
    result: &'a ScheduleResult,
    preemptive: bool,
}

impl fmt::Display for ResultRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let extra = if self.preemptive {
            r.slice_count().to_string()
        } else {
            r.priority_class
                .map(|c| c.to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        write!(
            f,
            "{:<iw$} {:<nw$} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$} {:>w$}",
            truncate(&r.id, ID_WIDTH),
            truncate(&r.name, NAME_WIDTH),
            r.burst,
            r.start_time,
            r.completion_time,
            r.turnaround_time,
            r.waiting_time,
            extra,
            iw = ID_WIDTH,
            nw = NAME_WIDTH,
            w = NUM_WIDTH,
        )
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, schedule) in self.schedules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{schedule}")?;
        }
        if !self.ingest_diagnostics.is_empty() {
            writeln!(f)?;
            writeln!(f, "Rejected input rows:")?;
            for d in &self.ingest_diagnostics {
                writeln!(f, "  line {}: {}", d.line, d.message)?;
            }
        }
        Ok(())
    }
}

fn truncate(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientSummary, Policy};
    use crate::scheduler::{PolicyScheduler, RoundRobinScheduler, SequentialScheduler};
    use crate::simulation::Simulation;

    fn patients() -> Vec<PatientSummary> {
        vec![
            PatientSummary::new("A").with_name("Ada").with_record_count(4),
            PatientSummary::new("B").with_name("Bob").with_record_count(3),
        ]
    }

    #[test]
    fn test_render_sequential() {
        let text = SequentialScheduler::sjf().schedule(&patients()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "=== SJF ===");
        assert!(lines[1].contains("End"));
        assert!(lines[3].starts_with("B"));
        assert!(lines[4].starts_with("A"));
        assert!(text.contains("Average waiting: 1.50"));
        assert!(text.contains("Makespan: 7"));
    }

    #[test]
    fn test_render_round_robin() {
        let text = RoundRobinScheduler::new().schedule(&patients()).to_string();
        assert!(text.starts_with("=== RR ==="));
        assert!(text.contains("Complete"));
        assert!(text.contains("Average waiting: 3.00"));
    }

    #[test]
    fn test_rows_are_fixed_width() {
        let text = SequentialScheduler::fcfs().schedule(&patients()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1].len(), lines[3].len());
        assert_eq!(lines[3].len(), lines[4].len());
    }

    #[test]
    fn test_render_report() {
        let report = Simulation::new()
            .with_policies([Policy::Fcfs, Policy::RoundRobin])
            .run(&patients());
        let text = report.to_string();
        assert!(text.contains("=== FCFS ==="));
        assert!(text.contains("=== RR ==="));
        assert!(!text.contains("Rejected input rows"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
        assert_eq!(truncate("ééé", 2), "éé");
    }
}
