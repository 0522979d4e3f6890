//! The capability contract every puzzle domain implements.
//!
//! The search engines only ever talk to a domain through [`Problem`] and
//! [`State`]. They never look inside a state or a move.

use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

/// Moves available from a single state, in the domain's fixed order.
///
/// Most puzzles offer a handful of moves per state, so they stay inline.
pub type MoveList<M> = SmallVec<[M; 8]>;

/// An ordered sequence of moves from the initial state to a goal state.
pub type Path<M> = Vec<M>;

/// One immutable point in a domain's configuration space.
///
/// `Eq + Hash` give the engines set membership; states are never ordered.
pub trait State: Clone + Eq + Hash + Debug {
    /// Whether this configuration is allowed by the domain's rules.
    fn is_valid(&self) -> bool;

    /// Whether this configuration satisfies the goal described by `goal`.
    fn is_goal(&self, goal: &Self) -> bool;
}

/// A state-space definition: initial and goal states plus the move rules.
///
/// # Contract
///
/// - `enumerate_moves` is a pure function of `state` and returns moves in the
///   same order every time. Both engines break ties using this order.
/// - `apply_move` returns a fresh state; it never aliases or mutates its input.
/// - `heuristic` is 0 at every goal state. A* only returns optimal paths when
///   it never overestimates the remaining cost.
///
/// None of this is checked at runtime. A domain that breaks it gets
/// unspecified engine behavior.
pub trait Problem {
    type State: State;
    type Move: Clone + Debug;

    fn initial_state(&self) -> &Self::State;

    fn goal_state(&self) -> &Self::State;

    /// Legal moves from `state`, in a reproducible order.
    fn enumerate_moves(&self, state: &Self::State) -> MoveList<Self::Move>;

    /// The state reached by playing `mv` from `state`.
    ///
    /// The result may be invalid; callers check [`State::is_valid`].
    fn apply_move(&self, state: &Self::State, mv: &Self::Move) -> Self::State;

    /// Human-readable description of `mv` played from `state`.
    fn describe_move(&self, mv: &Self::Move, state: &Self::State) -> String;

    /// Estimated number of moves from `state` to the goal.
    fn heuristic(&self, state: &Self::State) -> u64;

    /// Whether `state` satisfies this problem's goal.
    fn is_solved(&self, state: &Self::State) -> bool {
        state.is_goal(self.goal_state())
    }
}

/// Moves whose encoding can express "undo the previous move" as a literal
/// parameter swap.
pub trait ReversibleMove {
    /// True when `self` is `previous` with its parameter pair swapped.
    fn reverses(&self, previous: &Self) -> bool;
}

impl<T: PartialEq> ReversibleMove for (T, T) {
    fn reverses(&self, previous: &Self) -> bool {
        self.0 == previous.1 && self.1 == previous.0
    }
}
