//! Missionaries and cannibals: ferry everyone across without anyone being
//! outnumbered on either bank.

use std::fmt;

use serde::Serialize;

use crate::error::PuzzleError;
use crate::problem::{MoveList, Problem, ReversibleMove, State};

/// Boat loads as `(missionaries, cannibals)`, in the order they are tried.
const LOADS: [(u8, u8); 5] = [(1, 0), (2, 0), (0, 1), (0, 2), (1, 1)];

/// Headcount on the left bank plus the boat's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiverState {
    pub left_missionaries: u8,
    pub left_cannibals: u8,
    pub boat_left: bool,
    /// Number of people of each type in the puzzle.
    pub group_size: u8,
}

impl RiverState {
    pub fn right_missionaries(&self) -> u8 {
        self.group_size.saturating_sub(self.left_missionaries)
    }

    pub fn right_cannibals(&self) -> u8 {
        self.group_size.saturating_sub(self.left_cannibals)
    }
}

fn bank_is_safe(missionaries: u8, cannibals: u8) -> bool {
    missionaries == 0 || missionaries >= cannibals
}

impl State for RiverState {
    fn is_valid(&self) -> bool {
        self.left_missionaries <= self.group_size
            && self.left_cannibals <= self.group_size
            && bank_is_safe(self.left_missionaries, self.left_cannibals)
            && bank_is_safe(self.right_missionaries(), self.right_cannibals())
    }

    /// Everyone on the right bank and the boat moored there too.
    fn is_goal(&self, goal: &Self) -> bool {
        self == goal
    }
}

impl fmt::Display for RiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = usize::from(self.group_size) * 2;
        let bank = |m: u8, c: u8| {
            let mut s = "M".repeat(usize::from(m));
            s.push_str(&"C".repeat(usize::from(c)));
            s
        };
        let left = bank(self.left_missionaries, self.left_cannibals);
        let right = bank(self.right_missionaries(), self.right_cannibals());
        let (near, far) = if self.boat_left { ('<', ' ') } else { (' ', '>') };
        write!(f, "({left:<width$}){near}~~~{far}({right:<width$})")
    }
}

/// One boat trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Crossing {
    pub missionaries: u8,
    pub cannibals: u8,
    pub from_left: bool,
}

impl Crossing {
    pub fn new(missionaries: u8, cannibals: u8, from_left: bool) -> Self {
        Self {
            missionaries,
            cannibals,
            from_left,
        }
    }
}

impl ReversibleMove for Crossing {
    /// `(m, c)` followed by `(c, m)`; the direction is not compared.
    fn reverses(&self, previous: &Self) -> bool {
        self.missionaries == previous.cannibals && self.cannibals == previous.missionaries
    }
}

#[derive(Debug, Clone)]
pub struct RiverCrossing {
    initial: RiverState,
    goal: RiverState,
}

impl RiverCrossing {
    /// `group_size` missionaries and as many cannibals, boat on the left.
    pub fn new(group_size: u8) -> Result<Self, PuzzleError> {
        if group_size == 0 {
            return Err(PuzzleError::InvalidSize(
                "river crossing needs at least one of each type".to_string(),
            ));
        }
        Ok(Self::with_group_size(group_size))
    }

    /// The 3 + 3 instance.
    pub fn classic() -> Self {
        Self::with_group_size(3)
    }

    fn with_group_size(group_size: u8) -> Self {
        Self {
            initial: RiverState {
                left_missionaries: group_size,
                left_cannibals: group_size,
                boat_left: true,
                group_size,
            },
            goal: RiverState {
                left_missionaries: 0,
                left_cannibals: 0,
                boat_left: false,
                group_size,
            },
        }
    }
}

impl Problem for RiverCrossing {
    type State = RiverState;
    type Move = Crossing;

    fn initial_state(&self) -> &RiverState {
        &self.initial
    }

    fn goal_state(&self) -> &RiverState {
        &self.goal
    }

    fn enumerate_moves(&self, state: &RiverState) -> MoveList<Crossing> {
        let (available_m, available_c) = if state.boat_left {
            (state.left_missionaries, state.left_cannibals)
        } else {
            (state.right_missionaries(), state.right_cannibals())
        };
        LOADS
            .iter()
            .filter(|&&(m, c)| m <= available_m && c <= available_c)
            .map(|&(m, c)| Crossing::new(m, c, state.boat_left))
            .collect()
    }

    fn apply_move(&self, state: &RiverState, mv: &Crossing) -> RiverState {
        let (left_missionaries, left_cannibals) = if mv.from_left {
            (
                state.left_missionaries.saturating_sub(mv.missionaries),
                state.left_cannibals.saturating_sub(mv.cannibals),
            )
        } else {
            (
                state.left_missionaries.saturating_add(mv.missionaries),
                state.left_cannibals.saturating_add(mv.cannibals),
            )
        };
        RiverState {
            left_missionaries,
            left_cannibals,
            boat_left: !mv.from_left,
            group_size: state.group_size,
        }
    }

    fn describe_move(&self, mv: &Crossing, _state: &RiverState) -> String {
        let direction = if mv.from_left {
            "from left to right"
        } else {
            "from right to left"
        };
        format!("{}M {}C {}", mv.missionaries, mv.cannibals, direction)
    }

    /// Lower bound on remaining trips.
    ///
    /// Each round trip nets at most one person across and the final trip
    /// carries two, so `n` people with the boat on their side need at least
    /// `2n - 3` trips (1 when `n <= 2`). With the boat on the far side one
    /// extra trip brings it back first.
    fn heuristic(&self, state: &RiverState) -> u64 {
        let waiting = u64::from(state.left_missionaries) + u64::from(state.left_cannibals);
        match (waiting, state.boat_left) {
            (0, _) => 0,
            (n, false) => 2 * n,
            (n, true) if n <= 2 => 1,
            (n, true) => 2 * n - 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(m: u8, c: u8, boat_left: bool) -> RiverState {
        RiverState {
            left_missionaries: m,
            left_cannibals: c,
            boat_left,
            group_size: 3,
        }
    }

    #[test]
    fn test_outnumbered_missionaries_invalid() {
        assert!(state(3, 3, true).is_valid());
        assert!(state(0, 3, true).is_valid());
        assert!(!state(1, 2, true).is_valid());
        // Right bank holds 2M 3C.
        assert!(!state(1, 0, false).is_valid());
    }

    #[test]
    fn test_goal_requires_boat_on_far_bank() {
        let problem = RiverCrossing::classic();
        assert!(problem.is_solved(&state(0, 0, false)));
        assert!(!problem.is_solved(&state(0, 0, true)));
    }

    #[test]
    fn test_moves_limited_by_boat_side_headcount() {
        let problem = RiverCrossing::classic();
        let from_right = problem.enumerate_moves(&state(3, 1, false));
        let loads: Vec<(u8, u8)> = from_right
            .iter()
            .map(|c| (c.missionaries, c.cannibals))
            .collect();
        assert_eq!(loads, vec![(0, 1), (0, 2)]);
        assert!(from_right.iter().all(|c| !c.from_left));
    }

    #[test]
    fn test_heuristic_is_zero_at_goal_and_never_overestimates() {
        let problem = RiverCrossing::classic();
        assert_eq!(problem.heuristic(problem.goal_state()), 0);
        assert_eq!(problem.heuristic(problem.initial_state()), 9);
        assert_eq!(problem.heuristic(&state(1, 1, true)), 1);
        assert_eq!(problem.heuristic(&state(0, 1, false)), 2);
    }

    #[test]
    fn test_display_shows_banks_and_boat() {
        assert_eq!(state(3, 3, true).to_string(), "(MMMCCC)<~~~ (      )");
        assert_eq!(state(1, 1, false).to_string(), "(MC    ) ~~~>(MMCC  )");
    }

    #[test]
    fn test_crossing_reverses_on_swapped_counts() {
        assert!(Crossing::new(0, 2, false).reverses(&Crossing::new(2, 0, true)));
        assert!(Crossing::new(1, 1, false).reverses(&Crossing::new(1, 1, true)));
        assert!(!Crossing::new(0, 1, false).reverses(&Crossing::new(0, 2, true)));
    }

    #[test]
    fn test_crossing_serializes_camel_case() {
        let json = serde_json::to_value(Crossing::new(1, 1, true)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"missionaries": 1, "cannibals": 1, "fromLeft": true})
        );
    }

    #[test]
    fn test_zero_group_rejected() {
        assert!(RiverCrossing::new(0).is_err());
        assert_eq!(RiverCrossing::new(3).unwrap().initial_state(), &state(3, 3, true));
    }
}
