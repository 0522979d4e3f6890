//! Concrete puzzle domains.
//!
//! Each domain is its own [`Problem`](crate::problem::Problem) implementation;
//! [`PuzzleKind`] names them so callers can pick one up front.

pub mod blocks;
pub mod hanoi;
pub mod river_crossing;
pub mod sliding;

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

pub use blocks::{BlocksWorld, StackMove, Stacks};
pub use hanoi::{Hanoi, PegMove, Pegs};
pub use river_crossing::{Crossing, RiverCrossing, RiverState};
pub use sliding::{Board, Slide, SlidingTiles};

/// The available puzzle domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PuzzleKind {
    /// Missionaries and cannibals
    RiverCrossing,
    /// Tower of Hanoi
    Hanoi,
    /// Blocks world
    Blocks,
    /// Sliding tiles of any size
    Sliding,
    /// 4x4 sliding tiles
    Fifteen,
}

impl PuzzleKind {
    /// Domains whose move graphs are dense enough that listing every
    /// cycle-free solution path blows up.
    pub fn has_many_simple_paths(&self) -> bool {
        matches!(
            self,
            PuzzleKind::Blocks | PuzzleKind::Sliding | PuzzleKind::Fifteen
        )
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PuzzleKind::RiverCrossing => "river-crossing",
            PuzzleKind::Hanoi => "hanoi",
            PuzzleKind::Blocks => "blocks",
            PuzzleKind::Sliding => "sliding",
            PuzzleKind::Fifteen => "fifteen",
        };
        f.write_str(name)
    }
}
