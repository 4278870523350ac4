//! Rule engine for sequential multi-rule ordering.
//!
//! Rules are applied in sequence: a later rule only decides pairs that
//! every earlier rule considered equal. Sorting is stable, so pairs that
//! tie on every rule keep their input order unless a final tie-breaker
//! is configured.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{Candidate, OrderingRule};
use crate::models::PatientSummary;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreaker {
    /// Keep input order (stable sort).
    #[default]
    InputOrder,
    /// Deterministic by patient ID (lexicographic).
    ById,
}

/// A composable, stable rule engine.
///
/// # Example
/// ```
/// use u_triage::models::PatientSummary;
/// use u_triage::ordering::{RuleEngine, rules};
///
/// let patients = vec![
///     PatientSummary::new("long").with_record_count(7),
///     PatientSummary::new("short").with_record_count(2),
/// ];
/// let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
/// assert_eq!(engine.sort_indices(&patients), vec![1, 0]);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn OrderingRule>>,
    tie_breaker: TieBreaker,
}

impl RuleEngine {
    /// Creates an empty rule engine (input order).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Earlier rules take precedence.
    pub fn with_rule<R: OrderingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Rule names in precedence order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Whether any rule reads the priority class.
    pub fn needs_classes(&self) -> bool {
        self.rules.iter().any(|r| r.needs_class())
    }

    /// Prepares and sorts candidates for `patients`.
    ///
    /// Priority classes are attached once, before sorting, when a rule
    /// needs them.
    pub fn sort<'a>(&self, patients: &'a [PatientSummary]) -> Vec<Candidate<'a>> {
        let mut candidates = Candidate::prepare(patients, self.needs_classes());
        candidates.sort_by(|a, b| self.compare(a, b));
        candidates
    }

    /// Returns input indices in service order.
    pub fn sort_indices(&self, patients: &[PatientSummary]) -> Vec<usize> {
        self.sort(patients).iter().map(|c| c.index).collect()
    }

    /// Index of the patient served first.
    pub fn select_best(&self, patients: &[PatientSummary]) -> Option<usize> {
        self.sort_indices(patients).first().copied()
    }

    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
        for rule in &self.rules {
            let ord = rule.compare(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.patient.id.cmp(&b.patient.id),
        }
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PatientStatus;
    use crate::ordering::rules;

    fn patient(id: &str, count: u32, first_seen: &str) -> PatientSummary {
        PatientSummary::new(id)
            .with_record_count(count)
            .with_first_seen(first_seen)
    }

    #[test]
    fn test_empty_engine_keeps_input_order() {
        let patients = vec![patient("B", 3, "t2"), patient("A", 1, "t1")];
        let engine = RuleEngine::new();
        assert_eq!(engine.sort_indices(&patients), vec![0, 1]);
    }

    #[test]
    fn test_arrival_ordering() {
        let patients = vec![
            patient("late", 1, "2024-01-01T10:00:00"),
            patient("early", 1, "2024-01-01T08:00:00"),
            patient("middle", 1, "2024-01-01T09:00:00"),
        ];
        let engine = RuleEngine::new().with_rule(rules::Arrival);
        let order: Vec<&str> = engine
            .sort(&patients)
            .iter()
            .map(|c| c.patient.id.as_str())
            .collect();
        assert_eq!(order, vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_stable_on_ties() {
        let patients = vec![
            patient("C", 2, "t"),
            patient("A", 2, "t"),
            patient("B", 1, "t"),
        ];
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        // B first; C and A keep their input order
        assert_eq!(engine.sort_indices(&patients), vec![2, 0, 1]);
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let patients = vec![patient("C", 2, "t"), patient("A", 2, "t")];
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(TieBreaker::ById);
        assert_eq!(engine.sort_indices(&patients), vec![1, 0]);
    }

    #[test]
    fn test_sequential_rules() {
        let patients = vec![
            patient("routine_short", 1, "t"),
            patient("elevated_long", 8, "t").with_status(PatientStatus::Warning),
            patient("elevated_short", 3, "t").with_status(PatientStatus::Warning),
        ];
        let engine = RuleEngine::new()
            .with_rule(rules::Urgency)
            .with_rule(rules::ShortestBurst);

        let sorted = engine.sort(&patients);
        let order: Vec<&str> = sorted.iter().map(|c| c.patient.id.as_str()).collect();
        assert_eq!(order, vec!["elevated_short", "elevated_long", "routine_short"]);
        assert!(sorted.iter().all(|c| c.class.is_some()));
    }

    #[test]
    fn test_select_best_and_empty() {
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert!(engine.select_best(&[]).is_none());
        assert!(engine.sort_indices(&[]).is_empty());

        let patients = vec![patient("long", 5, "t"), patient("short", 1, "t")];
        assert_eq!(engine.select_best(&patients), Some(1));
    }

    #[test]
    fn test_rule_names() {
        let engine = RuleEngine::new()
            .with_rule(rules::Urgency)
            .with_rule(rules::ShortestBurst);
        assert_eq!(engine.rule_names(), vec!["URGENCY", "SJF"]);
        assert!(format!("{engine:?}").contains("URGENCY"));
    }
}
