//! Runs several policies over one patient snapshot.
//!
//! Policies never share mutable state: each run owns its clock and
//! per-patient counters and only borrows the patient rows. Running them
//! sequentially or on scoped threads gives identical reports.

use std::thread;

use serde::{Deserialize, Serialize};
use tracing::{info, info_span};

use crate::error::RowDiagnostic;
use crate::models::{PatientSummary, Policy, PolicySchedule};
use crate::scheduler::{scheduler_for, ScheduleKpi, DEFAULT_QUANTUM};
use crate::table::SummaryTable;

/// Simulation settings.
///
/// Deserializes with defaults for missing fields:
///
/// ```
/// use u_triage::simulation::SimulationConfig;
///
/// let config: SimulationConfig = serde_json::from_str(r#"{ "quantum": 3 }"#).unwrap();
/// assert_eq!(config.quantum, 3);
/// assert_eq!(config.policies.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Round robin time quantum.
    pub quantum: u64,
    /// Policies to run, in report order.
    pub policies: Vec<Policy>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            quantum: DEFAULT_QUANTUM,
            policies: Policy::ALL.to_vec(),
        }
    }
}

/// Report of a multi-policy run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// One schedule per configured policy, in configured order.
    pub schedules: Vec<PolicySchedule>,
    /// Rows rejected before scheduling (table ingestion).
    pub ingest_diagnostics: Vec<RowDiagnostic>,
}

impl SimulationReport {
    /// Schedule produced by `policy`, if it was run.
    pub fn schedule(&self, policy: Policy) -> Option<&PolicySchedule> {
        self.schedules.iter().find(|s| s.policy == policy)
    }

    /// KPIs for every schedule, in report order.
    pub fn kpis(&self) -> Vec<(Policy, ScheduleKpi)> {
        self.schedules
            .iter()
            .map(|s| (s.policy, ScheduleKpi::calculate(s)))
            .collect()
    }

    /// Ingestion and per-policy diagnostics combined.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &RowDiagnostic> {
        self.ingest_diagnostics
            .iter()
            .chain(self.schedules.iter().flat_map(|s| s.diagnostics.iter()))
    }
}

/// Multi-policy simulation runner.
///
/// # Example
///
/// ```
/// use u_triage::models::{PatientSummary, Policy};
/// use u_triage::simulation::Simulation;
///
/// let patients = vec![
///     PatientSummary::new("A").with_record_count(4),
///     PatientSummary::new("B").with_record_count(3),
/// ];
/// let report = Simulation::new().run(&patients);
/// assert_eq!(report.schedules.len(), 4);
/// assert_eq!(report.schedule(Policy::RoundRobin).unwrap().makespan(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    /// Creates a runner with default settings (all policies, quantum 2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a runner from a config.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Sets the round robin quantum.
    pub fn with_quantum(mut self, quantum: u64) -> Self {
        self.config.quantum = quantum;
        self
    }

    /// Sets the policies to run.
    pub fn with_policies(mut self, policies: impl Into<Vec<Policy>>) -> Self {
        self.config.policies = policies.into();
        self
    }

    /// Current settings.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Runs every configured policy sequentially.
    pub fn run(&self, patients: &[PatientSummary]) -> SimulationReport {
        let _span = info_span!("simulation", patients = patients.len()).entered();
        let schedules: Vec<PolicySchedule> = self
            .config
            .policies
            .iter()
            .map(|&policy| scheduler_for(policy, self.config.quantum).schedule(patients))
            .collect();
        self.finish(schedules)
    }

    /// Runs every configured policy on its own scoped thread.
    ///
    /// Output is identical to [`Simulation::run`].
    pub fn run_parallel(&self, patients: &[PatientSummary]) -> SimulationReport {
        let _span = info_span!("simulation", patients = patients.len(), parallel = true).entered();
        let quantum = self.config.quantum;
        let schedules: Vec<PolicySchedule> = thread::scope(|scope| {
            let handles: Vec<_> = self
                .config
                .policies
                .iter()
                .map(|&policy| {
                    scope.spawn(move || scheduler_for(policy, quantum).schedule(patients))
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect()
        });
        self.finish(schedules)
    }

    /// Runs every configured policy over a parsed table, keeping its
    /// ingestion diagnostics in the report.
    pub fn run_table(&self, table: &SummaryTable) -> SimulationReport {
        let mut report = self.run(&table.patients);
        report.ingest_diagnostics = table.diagnostics.clone();
        report
    }

    fn finish(&self, schedules: Vec<PolicySchedule>) -> SimulationReport {
        for s in &schedules {
            info!(policy = %s.policy, patients = s.len(), makespan = s.makespan(), "schedule ready");
        }
        SimulationReport {
            schedules,
            ingest_diagnostics: Vec::new(),
        }
    }
}
