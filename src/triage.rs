//! Priority classification from status and vital thresholds.
//!
//! # Rule
//!
//! | Status | Critical vital present | Class |
//! |--------|------------------------|-------|
//! | NORMAL | (ignored) | 3 |
//! | WARNING | no | 2 |
//! | WARNING | yes | 1 |
//!
//! A vital is critical when SpO2 < 92 %, systolic > 160 mmHg,
//! diastolic > 100 mmHg or heart rate > 130 bpm. Thresholds are fixed.

use crate::models::{PatientStatus, PatientSummary, PriorityClass};

/// SpO2 below this (%) is critical.
pub const SPO2_CRITICAL_BELOW: f64 = 92.0;
/// Systolic pressure above this (mmHg) is critical.
pub const SYSTOLIC_CRITICAL_ABOVE: f64 = 160.0;
/// Diastolic pressure above this (mmHg) is critical.
pub const DIASTOLIC_CRITICAL_ABOVE: f64 = 100.0;
/// Heart rate above this (bpm) is critical.
pub const HEART_RATE_CRITICAL_ABOVE: f64 = 130.0;

/// Classifies a patient from status and average vitals.
///
/// # Example
/// ```
/// use u_triage::models::{PatientStatus, PriorityClass};
/// use u_triage::triage::classify;
///
/// assert_eq!(classify(PatientStatus::Normal, 180.0, 200.0, 120.0, 70.0), PriorityClass::Routine);
/// assert_eq!(classify(PatientStatus::Warning, 140.0, 120.0, 80.0, 98.0), PriorityClass::Urgent);
/// ```
pub fn classify(
    status: PatientStatus,
    heart_rate: f64,
    systolic: f64,
    diastolic: f64,
    spo2: f64,
) -> PriorityClass {
    if status != PatientStatus::Warning {
        return PriorityClass::Routine;
    }

    let critical = spo2 < SPO2_CRITICAL_BELOW
        || systolic > SYSTOLIC_CRITICAL_ABOVE
        || diastolic > DIASTOLIC_CRITICAL_ABOVE
        || heart_rate > HEART_RATE_CRITICAL_ABOVE;

    if critical {
        PriorityClass::Urgent
    } else {
        PriorityClass::Elevated
    }
}

/// Classifies a patient summary.
pub fn classify_patient(patient: &PatientSummary) -> PriorityClass {
    classify(
        patient.status,
        patient.avg_heart_rate,
        patient.avg_systolic,
        patient.avg_diastolic,
        patient.avg_spo2,
    )
}
