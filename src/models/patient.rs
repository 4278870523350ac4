//! Patient summary model.
//!
//! A patient summary is one row of the aggregated vital-sign table: the
//! patient's identity, how many raw records were seen (the burst time),
//! average vitals, and the derived status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RowError;

/// Derived vital-sign status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    /// All averages within normal ranges.
    #[default]
    Normal,
    /// At least one average outside normal ranges.
    Warning,
}

impl PatientStatus {
    /// Table representation (`NORMAL` / `WARNING`).
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Normal => "NORMAL",
            PatientStatus::Warning => "WARNING",
        }
    }
}

impl FromStr for PatientStatus {
    type Err = RowError;

    /// Parses the exact table spelling; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(PatientStatus::Normal),
            "WARNING" => Ok(PatientStatus::Warning),
            other => Err(RowError::UnknownStatus(other.to_string())),
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency class used by priority scheduling.
///
/// Lower numeric value = more urgent = scheduled first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityClass {
    /// Warning status with at least one critical vital.
    Urgent = 1,
    /// Warning status, no critical vitals.
    Elevated = 2,
    /// Normal status.
    Routine = 3,
}

impl PriorityClass {
    /// Numeric class (1, 2 or 3).
    #[inline]
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Aggregated vital-sign summary for one patient.
///
/// Read-only input to every scheduling policy. `record_count` is the
/// burst time; a value of zero is rejected by the schedulers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientSummary {
    /// Unique patient identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Number of raw records (burst time).
    pub record_count: u32,
    /// Average heart rate (bpm).
    pub avg_heart_rate: f64,
    /// Average systolic pressure (mmHg).
    pub avg_systolic: f64,
    /// Average diastolic pressure (mmHg).
    pub avg_diastolic: f64,
    /// Average body temperature (°C).
    pub avg_temp: f64,
    /// Average oxygen saturation (%).
    pub avg_spo2: f64,
    /// Derived status.
    pub status: PatientStatus,
    /// ISO-8601 timestamp of the first record. Only used as the FCFS key.
    pub first_seen: String,
}

impl PatientSummary {
    /// Creates a summary with the given ID, one record and normal vitals.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            record_count: 1,
            avg_heart_rate: 75.0,
            avg_systolic: 120.0,
            avg_diastolic: 80.0,
            avg_temp: 36.8,
            avg_spo2: 98.0,
            status: PatientStatus::Normal,
            first_seen: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the record count (burst time).
    pub fn with_record_count(mut self, count: u32) -> Self {
        self.record_count = count;
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: PatientStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets average heart rate, systolic, diastolic and SpO2.
    pub fn with_vitals(mut self, heart_rate: f64, systolic: f64, diastolic: f64, spo2: f64) -> Self {
        self.avg_heart_rate = heart_rate;
        self.avg_systolic = systolic;
        self.avg_diastolic = diastolic;
        self.avg_spo2 = spo2;
        self
    }

    /// Sets the average temperature.
    pub fn with_temp(mut self, temp: f64) -> Self {
        self.avg_temp = temp;
        self
    }

    /// Sets the first-seen timestamp.
    pub fn with_first_seen(mut self, timestamp: impl Into<String>) -> Self {
        self.first_seen = timestamp.into();
        self
    }

    /// Burst time in simulation ticks.
    #[inline]
    pub fn burst(&self) -> u64 {
        u64::from(self.record_count)
    }

    /// Whether this patient can be scheduled (burst ≥ 1).
    #[inline]
    pub fn is_schedulable(&self) -> bool {
        self.record_count > 0
    }
}
