//! Sort candidates: a patient, its input position and its urgency class.

use crate::models::{PatientSummary, PriorityClass};
use crate::triage::classify_patient;

/// A patient prepared for ordering.
///
/// The priority class is computed once, before sorting, and is `None`
/// when no rule needs it.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Position in the input slice.
    pub index: usize,
    /// The patient row.
    pub patient: &'a PatientSummary,
    /// Urgency class, when classification was requested.
    pub class: Option<PriorityClass>,
}

impl<'a> Candidate<'a> {
    /// Wraps a patient without classifying it.
    pub fn new(index: usize, patient: &'a PatientSummary) -> Self {
        Self {
            index,
            patient,
            class: None,
        }
    }

    /// Wraps and classifies a patient.
    pub fn classified(index: usize, patient: &'a PatientSummary) -> Self {
        Self {
            index,
            patient,
            class: Some(classify_patient(patient)),
        }
    }

    /// Prepares candidates for every patient, in input order.
    pub fn prepare(patients: &'a [PatientSummary], classify: bool) -> Vec<Self> {
        patients
            .iter()
            .enumerate()
            .map(|(i, p)| {
                if classify {
                    Self::classified(i, p)
                } else {
                    Self::new(i, p)
                }
            })
            .collect()
    }
}
