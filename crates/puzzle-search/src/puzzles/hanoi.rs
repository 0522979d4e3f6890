//! Disk towers: move a stack of disks from peg 0 to peg 2, never placing a
//! disk on a smaller one.

use std::fmt;

use crate::error::PuzzleError;
use crate::problem::{MoveList, Problem, State};

pub const PEG_COUNT: usize = 3;
const TARGET_PEG: usize = PEG_COUNT - 1;

/// `(source peg, destination peg)`.
pub type PegMove = (usize, usize);

/// Disks on each peg, bottom first. Disk `1` is the smallest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pegs {
    pub pegs: [Vec<u8>; PEG_COUNT],
}

impl Pegs {
    fn top(&self, peg: usize) -> Option<u8> {
        self.pegs.get(peg).and_then(|p| p.last().copied())
    }
}

impl State for Pegs {
    fn is_valid(&self) -> bool {
        self.pegs
            .iter()
            .all(|peg| peg.windows(2).all(|pair| pair[0] > pair[1]))
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self == goal
    }
}

impl fmt::Display for Pegs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, peg) in self.pegs.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "Peg {i}: {peg:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Hanoi {
    initial: Pegs,
    goal: Pegs,
}

impl Hanoi {
    pub fn new(disks: u8) -> Result<Self, PuzzleError> {
        if disks == 0 {
            return Err(PuzzleError::InvalidSize(
                "disk towers need at least one disk".to_string(),
            ));
        }
        let tower: Vec<u8> = (1..=disks).rev().collect();
        Ok(Self {
            initial: Pegs {
                pegs: [tower.clone(), Vec::new(), Vec::new()],
            },
            goal: Pegs {
                pegs: [Vec::new(), Vec::new(), tower],
            },
        })
    }
}

impl Problem for Hanoi {
    type State = Pegs;
    type Move = PegMove;

    fn initial_state(&self) -> &Pegs {
        &self.initial
    }

    fn goal_state(&self) -> &Pegs {
        &self.goal
    }

    fn enumerate_moves(&self, state: &Pegs) -> MoveList<PegMove> {
        let mut moves = MoveList::new();
        for source in 0..PEG_COUNT {
            let Some(disk) = state.top(source) else {
                continue;
            };
            for destination in 0..PEG_COUNT {
                if source == destination {
                    continue;
                }
                if state.top(destination).map_or(true, |top| disk < top) {
                    moves.push((source, destination));
                }
            }
        }
        moves
    }

    fn apply_move(&self, state: &Pegs, &(source, destination): &PegMove) -> Pegs {
        let mut next = state.clone();
        if source < PEG_COUNT && destination < PEG_COUNT {
            if let Some(disk) = next.pegs[source].pop() {
                next.pegs[destination].push(disk);
            }
        }
        next
    }

    fn describe_move(&self, &(source, destination): &PegMove, state: &Pegs) -> String {
        match state.top(source) {
            Some(disk) => format!("Move disk {disk} from peg {source} to peg {destination}"),
            None => format!("Move from empty peg {source} to peg {destination}"),
        }
    }

    /// Disks not yet on the target peg; each needs at least one move.
    fn heuristic(&self, state: &Pegs) -> u64 {
        state.pegs[..TARGET_PEG]
            .iter()
            .map(|peg| peg.len() as u64)
            .sum()
    }
}
