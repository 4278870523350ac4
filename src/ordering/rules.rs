//! Built-in ordering rules.
//!
//! - **Arrival**: earliest first-seen timestamp first (FCFS)
//! - **ShortestBurst**: fewest records first (SJF)
//! - **Urgency**: lowest priority class first (Priority)

use std::cmp::Ordering;

use super::{Candidate, OrderingRule};
use crate::triage::classify_patient;

/// First come, first served.
///
/// Compares ISO-8601 first-seen timestamps lexicographically. Equal
/// timestamps tie.
#[derive(Debug, Clone, Copy)]
pub struct Arrival;

impl OrderingRule for Arrival {
    fn name(&self) -> &'static str {
        "ARRIVAL"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        a.patient.first_seen.cmp(&b.patient.first_seen)
    }
}

/// Shortest job first.
///
/// Minimizes mean waiting time for a batch that is ready at t=0.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl OrderingRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        a.patient.record_count.cmp(&b.patient.record_count)
    }
}

/// Most urgent priority class first.
///
/// Uses the class attached to the candidate; falls back to classifying
/// the patient if none was attached.
#[derive(Debug, Clone, Copy)]
pub struct Urgency;

impl OrderingRule for Urgency {
    fn name(&self) -> &'static str {
        "URGENCY"
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        let class_a = a.class.unwrap_or_else(|| classify_patient(a.patient));
        let class_b = b.class.unwrap_or_else(|| classify_patient(b.patient));
        class_a.cmp(&class_b)
    }

    fn needs_class(&self) -> bool {
        true
    }
}
