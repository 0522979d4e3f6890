//! Path replay: re-apply a solution from the initial state and check it.
//!
//! The steps produced here are what a presentation layer renders; they are
//! built only from the path and the problem, never from engine internals.

use crate::error::ReplayError;
use crate::problem::{Problem, State};

/// One applied move and the state it led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S> {
    /// Description of the move, rendered against the state it was played from.
    pub description: String,
    pub state: S,
}

/// Replay `path`, checking every intermediate state and the final goal.
pub fn replay<P: Problem>(
    problem: &P,
    path: &[P::Move],
) -> Result<Vec<Step<P::State>>, ReplayError> {
    let mut steps: Vec<Step<P::State>> = Vec::with_capacity(path.len());
    let mut current = problem.initial_state().clone();

    for (step, mv) in path.iter().enumerate() {
        let description = problem.describe_move(mv, &current);
        let next = problem.apply_move(&current, mv);
        if !next.is_valid() {
            return Err(ReplayError::InvalidState { step });
        }
        steps.push(Step {
            description,
            state: next.clone(),
        });
        current = next;
    }

    if !problem.is_solved(&current) {
        return Err(ReplayError::GoalNotReached { moves: path.len() });
    }
    Ok(steps)
}

/// Does `path` lead from the initial state to the goal through valid states?
pub fn verify_path<P: Problem>(problem: &P, path: &[P::Move]) -> bool {
    replay(problem, path).is_ok()
}
