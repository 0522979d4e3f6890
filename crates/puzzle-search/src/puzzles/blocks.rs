//! Block stacking: rearrange labelled blocks between named stacks, one top
//! block at a time.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::PuzzleError;
use crate::problem::{MoveList, Problem, State};

/// `(source stack, destination stack)`.
pub type StackMove = (char, char);

/// Stacks keyed by name, each listed bottom first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stacks {
    pub stacks: BTreeMap<char, Vec<char>>,
}

impl Stacks {
    pub fn new<I, B>(stacks: I) -> Self
    where
        I: IntoIterator<Item = (char, B)>,
        B: IntoIterator<Item = char>,
    {
        Self {
            stacks: stacks
                .into_iter()
                .map(|(name, blocks)| (name, blocks.into_iter().collect()))
                .collect(),
        }
    }

    fn top(&self, stack: char) -> Option<char> {
        self.stacks.get(&stack).and_then(|s| s.last().copied())
    }

    fn blocks(&self) -> impl Iterator<Item = char> + '_ {
        self.stacks.values().flatten().copied()
    }
}

impl State for Stacks {
    /// No block appears twice.
    fn is_valid(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.blocks().all(|block| seen.insert(block))
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self == goal
    }
}

impl fmt::Display for Stacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, blocks)) in self.stacks.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            write!(f, "{name}: {blocks:?}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BlocksWorld {
    initial: Stacks,
    goal: Stacks,
}

impl BlocksWorld {
    /// Both arrangements must use the same stack names and the same blocks.
    pub fn new(initial: Stacks, goal: Stacks) -> Result<Self, PuzzleError> {
        if !initial.is_valid() || !goal.is_valid() {
            return Err(PuzzleError::Mismatch("a block appears twice".to_string()));
        }
        if !initial.stacks.keys().eq(goal.stacks.keys()) {
            return Err(PuzzleError::Mismatch(
                "stack names differ between initial and goal".to_string(),
            ));
        }
        let initial_blocks: BTreeSet<char> = initial.blocks().collect();
        let goal_blocks: BTreeSet<char> = goal.blocks().collect();
        if initial_blocks != goal_blocks {
            return Err(PuzzleError::Mismatch(
                "blocks differ between initial and goal".to_string(),
            ));
        }
        Ok(Self { initial, goal })
    }

    /// `a b c` stacked on A, to be spread one per stack.
    pub fn classic() -> Result<Self, PuzzleError> {
        Self::new(
            Stacks::new([('A', vec!['a', 'b', 'c']), ('B', vec![]), ('C', vec![])]),
            Stacks::new([('A', vec!['a']), ('B', vec!['b']), ('C', vec!['c'])]),
        )
    }
}

impl Problem for BlocksWorld {
    type State = Stacks;
    type Move = StackMove;

    fn initial_state(&self) -> &Stacks {
        &self.initial
    }

    fn goal_state(&self) -> &Stacks {
        &self.goal
    }

    fn enumerate_moves(&self, state: &Stacks) -> MoveList<StackMove> {
        let mut moves = MoveList::new();
        for (&source, blocks) in &state.stacks {
            if blocks.is_empty() {
                continue;
            }
            for &destination in state.stacks.keys() {
                if source != destination {
                    moves.push((source, destination));
                }
            }
        }
        moves
    }

    fn apply_move(&self, state: &Stacks, &(source, destination): &StackMove) -> Stacks {
        let mut next = state.clone();
        if !next.stacks.contains_key(&destination) {
            return next;
        }
        let block = next.stacks.get_mut(&source).and_then(Vec::pop);
        if let (Some(block), Some(stack)) = (block, next.stacks.get_mut(&destination)) {
            stack.push(block);
        }
        next
    }

    fn describe_move(&self, &(source, destination): &StackMove, state: &Stacks) -> String {
        match state.top(source) {
            Some(block) => format!("Move block {block} from {source} to {destination}"),
            None => format!("Move top block from {source} to {destination}"),
        }
    }

    /// Goal positions not yet holding their block. A move fills at most one.
    fn heuristic(&self, state: &Stacks) -> u64 {
        let mut misplaced = 0;
        for (name, goal_blocks) in &self.goal.stacks {
            let current = state.stacks.get(name).map(Vec::as_slice).unwrap_or(&[]);
            for (i, block) in goal_blocks.iter().enumerate() {
                if current.get(i) != Some(block) {
                    misplaced += 1;
                }
            }
        }
        misplaced
    }
}
