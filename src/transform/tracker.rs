//! Mutation counting across a batch.

use super::image::Outcome;
use std::ops::AddAssign;

/// MutationTracker totals leaf outcomes over a whole run.
///
/// `fired` counts every leaf the rule matched, including leaves that already
/// held the rendered value; it is the number reported in the summary.
/// `changed` counts only leaves whose text was rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationTracker {
    pub fired: usize,
    pub changed: usize,
}

impl MutationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &Outcome) {
        if outcome.fired() {
            self.fired += 1;
        }
        if outcome.changed() {
            self.changed += 1;
        }
    }

    /// The count reported as "updated images".
    pub fn total(&self) -> usize {
        self.fired
    }
}

impl AddAssign for MutationTracker {
    fn add_assign(&mut self, other: Self) {
        self.fired += other.fired;
        self.changed += other.changed;
    }
}
