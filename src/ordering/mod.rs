//! Ordering rules and rule engine for the non-preemptive policies.
//!
//! FCFS, SJF and Priority share one timing model; the only thing that
//! differs between them is the order in which patients are served. That
//! order is produced here by composing [`OrderingRule`]s.
//!
//! # Usage
//!
//! ```
//! use u_triage::ordering::{RuleEngine, rules};
//!
//! // Priority policy: urgency class first, shortest burst on ties.
//! let engine = RuleEngine::new()
//!     .with_rule(rules::Urgency)
//!     .with_rule(rules::ShortestBurst);
//! assert!(engine.needs_classes());
//! ```

mod candidate;
mod engine;
pub mod rules;

pub use candidate::Candidate;
pub use engine::{RuleEngine, TieBreaker};

use std::cmp::Ordering;
use std::fmt::Debug;

/// A rule that orders two patients.
///
/// `Ordering::Less` means `a` is served before `b`. Returning
/// `Ordering::Equal` hands the decision to the next rule.
pub trait OrderingRule: Send + Sync + Debug {
    /// Rule name (e.g., "ARRIVAL", "SJF").
    fn name(&self) -> &'static str;

    /// Compares two candidates.
    fn compare(&self, a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering;

    /// Whether the rule reads `Candidate::class`.
    fn needs_class(&self) -> bool {
        false
    }
}
