//! Search outcomes and run diagnostics.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::problem::Path;

/// How a best-first search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<M> {
    /// A goal state was reached along this path.
    Solved(Path<M>),
    /// The frontier emptied: no goal is reachable from the initial state.
    Unsolvable,
    /// The expansion budget ran out first. Solvability is unknown.
    BudgetExceeded,
    /// The deadline passed first. Solvability is unknown.
    TimedOut,
}

impl<M> SearchOutcome<M> {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            SearchOutcome::Solved(_) => OutcomeKind::Solved,
            SearchOutcome::Unsolvable => OutcomeKind::Unsolvable,
            SearchOutcome::BudgetExceeded => OutcomeKind::BudgetExceeded,
            SearchOutcome::TimedOut => OutcomeKind::TimedOut,
        }
    }
}

/// Payload-free tag of a [`SearchOutcome`], for logs and JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Solved,
    Unsolvable,
    BudgetExceeded,
    TimedOut,
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutcomeKind::Solved => "solved",
            OutcomeKind::Unsolvable => "unsolvable",
            OutcomeKind::BudgetExceeded => "budget_exceeded",
            OutcomeKind::TimedOut => "timed_out",
        };
        f.write_str(name)
    }
}

/// Result of one A* run: the outcome plus how much work it took.
#[derive(Debug, Clone)]
pub struct SearchReport<M> {
    pub outcome: SearchOutcome<M>,
    /// Nodes popped and expanded (stale duplicates are not counted).
    pub expansions: u64,
    pub elapsed: Duration,
}

impl<M> SearchReport<M> {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    pub fn path(&self) -> Option<&[M]> {
        match &self.outcome {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }

    pub fn into_path(self) -> Option<Path<M>> {
        match self.outcome {
            SearchOutcome::Solved(path) => Some(path),
            _ => None,
        }
    }
}
