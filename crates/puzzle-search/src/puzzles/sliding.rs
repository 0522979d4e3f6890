//! Sliding tiles on a `width x height` board; the 15-puzzle is 4x4.
//!
//! Tile `0` is the blank. The goal reads `1, 2, ..., n-1` row by row with
//! the blank in the bottom-right corner.

use std::fmt;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::error::PuzzleError;
use crate::problem::{MoveList, Problem, ReversibleMove, State};

const BLANK: u8 = 0;

/// Largest supported board side; tiles are stored as `u8`.
pub const MAX_SIDE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    pub tiles: Vec<u8>,
    pub width: usize,
}

impl Board {
    fn blank_index(&self) -> Option<usize> {
        self.tiles.iter().position(|&t| t == BLANK)
    }

    fn height(&self) -> usize {
        self.tiles.len() / self.width.max(1)
    }
}

impl State for Board {
    /// A permutation of `0..width*height`.
    fn is_valid(&self) -> bool {
        let mut seen = vec![false; self.tiles.len()];
        self.width > 0
            && self.tiles.len() % self.width == 0
            && self.tiles.iter().all(|&t| {
                let t = usize::from(t);
                t < seen.len() && !std::mem::replace(&mut seen[t], true)
            })
    }

    fn is_goal(&self, goal: &Self) -> bool {
        self.tiles == goal.tiles
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.tiles.chunks(self.width.max(1)).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row
                .iter()
                .map(|&t| match t {
                    BLANK => "  ".to_string(),
                    t => format!("{t:2}"),
                })
                .collect();
            f.write_str(&cells.join(" "))?;
        }
        Ok(())
    }
}

/// The tile at index `from` slides into the blank at index `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Slide {
    pub from: usize,
    pub to: usize,
}

impl ReversibleMove for Slide {
    fn reverses(&self, previous: &Self) -> bool {
        self.from == previous.to && self.to == previous.from
    }
}

#[derive(Debug, Clone)]
pub struct SlidingTiles {
    initial: Board,
    goal: Board,
    height: usize,
    /// Goal index of every tile value.
    goal_index: Vec<usize>,
}

impl SlidingTiles {
    /// Start from `tiles` (row-major). The board must be solvable.
    pub fn new(width: usize, height: usize, tiles: Vec<u8>) -> Result<Self, PuzzleError> {
        let goal = Self::goal_board(width, height)?;
        let initial = Board { tiles, width };
        if initial.tiles.len() != goal.tiles.len() || !initial.is_valid() {
            return Err(PuzzleError::Mismatch(format!(
                "tiles must be a permutation of 0..{}",
                goal.tiles.len()
            )));
        }
        if !Self::is_solvable(&initial.tiles, width) {
            return Err(PuzzleError::Mismatch("board is not solvable".to_string()));
        }
        Ok(Self::from_boards(initial, goal, height))
    }

    /// A solvable board made by `moves` seeded random slides from the goal.
    pub fn scrambled(
        width: usize,
        height: usize,
        moves: usize,
        seed: u64,
    ) -> Result<Self, PuzzleError> {
        let goal = Self::goal_board(width, height)?;
        let mut puzzle = Self::from_boards(goal.clone(), goal, height);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut board = puzzle.initial.clone();
        for _ in 0..moves {
            let options = puzzle.enumerate_moves(&board);
            if let Some(slide) = options.choose(&mut rng) {
                board = puzzle.apply_move(&board, slide);
            }
        }
        puzzle.initial = board;
        Ok(puzzle)
    }

    /// 4x4 scramble.
    pub fn fifteen(moves: usize, seed: u64) -> Result<Self, PuzzleError> {
        Self::scrambled(4, 4, moves, seed)
    }

    /// Inversion parity check against the bottom-right-blank goal.
    ///
    /// A single row or column can never reorder its tiles, so there only the
    /// goal order is solvable.
    pub fn is_solvable(tiles: &[u8], width: usize) -> bool {
        if width == 0 || tiles.len() % width != 0 {
            return false;
        }
        let height = tiles.len() / width;
        let numbered: Vec<u8> = tiles.iter().copied().filter(|&t| t != BLANK).collect();
        let mut inversions = 0usize;
        for (i, a) in numbered.iter().enumerate() {
            inversions += numbered[i + 1..].iter().filter(|&b| a > b).count();
        }
        if width == 1 || height == 1 {
            return inversions == 0;
        }
        if width % 2 == 1 {
            return inversions % 2 == 0;
        }
        let Some(blank) = tiles.iter().position(|&t| t == BLANK) else {
            return false;
        };
        let rows_from_bottom = height - blank / width;
        (inversions + rows_from_bottom) % 2 == 1
    }

    fn goal_board(width: usize, height: usize) -> Result<Board, PuzzleError> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(PuzzleError::InvalidSize(format!(
                "board sides must be between 1 and {MAX_SIDE}, got {width}x{height}"
            )));
        }
        let cells = width * height;
        if cells < 2 {
            return Err(PuzzleError::InvalidSize(
                "board needs at least two cells".to_string(),
            ));
        }
        // Bounded by MAX_SIDE^2 < 256.
        let mut tiles: Vec<u8> = (1..cells).map(|t| t as u8).collect();
        tiles.push(BLANK);
        Ok(Board { tiles, width })
    }

    fn from_boards(initial: Board, goal: Board, height: usize) -> Self {
        let mut goal_index = vec![0; goal.tiles.len()];
        for (i, &t) in goal.tiles.iter().enumerate() {
            goal_index[usize::from(t)] = i;
        }
        Self {
            initial,
            goal,
            height,
            goal_index,
        }
    }

    pub fn width(&self) -> usize {
        self.goal.width
    }

    pub fn height(&self) -> usize {
        self.height
    }
}

impl Problem for SlidingTiles {
    type State = Board;
    type Move = Slide;

    fn initial_state(&self) -> &Board {
        &self.initial
    }

    fn goal_state(&self) -> &Board {
        &self.goal
    }

    /// Neighbours of the blank: up, down, left, right.
    fn enumerate_moves(&self, state: &Board) -> MoveList<Slide> {
        let mut moves = MoveList::new();
        let Some(blank) = state.blank_index() else {
            return moves;
        };
        let (width, height) = (state.width, state.height());
        let (row, col) = (blank / width, blank % width);
        if row > 0 {
            moves.push(Slide {
                from: blank - width,
                to: blank,
            });
        }
        if row + 1 < height {
            moves.push(Slide {
                from: blank + width,
                to: blank,
            });
        }
        if col > 0 {
            moves.push(Slide {
                from: blank - 1,
                to: blank,
            });
        }
        if col + 1 < width {
            moves.push(Slide {
                from: blank + 1,
                to: blank,
            });
        }
        moves
    }

    fn apply_move(&self, state: &Board, mv: &Slide) -> Board {
        let mut next = state.clone();
        if mv.from < next.tiles.len() && mv.to < next.tiles.len() {
            next.tiles.swap(mv.from, mv.to);
        }
        next
    }

    fn describe_move(&self, mv: &Slide, state: &Board) -> String {
        match state.tiles.get(mv.from) {
            Some(tile) => format!("Move tile {tile} to empty space"),
            None => format!("Move tile at {} to empty space", mv.from),
        }
    }

    /// Sum of Manhattan distances of the numbered tiles to their goal cells.
    fn heuristic(&self, state: &Board) -> u64 {
        let width = self.goal.width;
        state
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != BLANK)
            .filter_map(|(i, &t)| {
                let target = *self.goal_index.get(usize::from(t))?;
                let rows = (i / width).abs_diff(target / width);
                let cols = (i % width).abs_diff(target % width);
                Some((rows + cols) as u64)
            })
            .sum()
    }
}
