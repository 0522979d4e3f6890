//! Generic state-space search for small combinatorial puzzles.
//!
//! Domains implement [`Problem`] and [`State`]; the engines only go through
//! that contract:
//!
//! - [`astar::solve`] runs budgeted best-first search and reports why it
//!   stopped ([`SearchOutcome`]) together with expansion count and elapsed time.
//! - [`dfs::solve_first`] / [`dfs::solve_all`] enumerate solution paths by
//!   backtracking with a path-local visited set.
//! - [`simplify::simplify`] drops immediately reversed move pairs from a path.
//! - [`replay::replay`] checks a path and yields renderable steps.

pub mod astar;
pub mod config;
pub mod dfs;
pub mod error;
pub mod problem;
pub mod puzzles;
pub mod replay;
pub mod report;
pub mod simplify;

// Re-export main types
pub use config::SearchConfig;
pub use error::{ConfigError, PuzzleError, ReplayError};
pub use problem::{MoveList, Path, Problem, ReversibleMove, State};
pub use puzzles::PuzzleKind;
pub use replay::{replay, verify_path, Step};
pub use report::{OutcomeKind, SearchOutcome, SearchReport};
pub use simplify::simplify;
