//! Exhaustive depth-first enumeration with path-local cycle avoidance.
//!
//! A state is "on the path" while its subtree is being explored and is
//! released when the search backtracks out of it, so the same state can be
//! reached again through a different branch. Nothing bounds the recursion
//! depth: domains whose valid, cycle-free paths can grow very long will
//! exhaust the stack.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::time::Instant;

use tracing::{debug, info};

use crate::problem::{Path, Problem, State};

/// Return the first solution found, following the domain's move order.
pub fn solve_first<P: Problem>(problem: &P) -> Option<Path<P::Move>> {
    run(problem, true).into_iter().next()
}

/// Return every solution path that never repeats a state, in discovery order.
pub fn solve_all<P: Problem>(problem: &P) -> Vec<Path<P::Move>> {
    run(problem, false)
}

fn run<P: Problem>(problem: &P, stop_at_first: bool) -> Vec<Path<P::Move>> {
    let start = Instant::now();
    let mode = if stop_at_first { "first" } else { "all" };
    info!(event = "search_start", engine = "dfs", mode);

    let mut enumerator = Enumerator {
        problem,
        stop_at_first,
        on_path: HashSet::new(),
        moves: Vec::new(),
        solutions: Vec::new(),
        nodes: 0,
    };
    let _ = enumerator.explore(problem.initial_state());

    info!(
        event = "search_end",
        engine = "dfs",
        mode,
        solutions = enumerator.solutions.len(),
        nodes = enumerator.nodes,
        elapsed_ms = start.elapsed().as_millis() as u64,
    );
    enumerator.solutions
}

/// Recursive backtracking state for a single run.
struct Enumerator<'a, P: Problem> {
    problem: &'a P,
    stop_at_first: bool,
    /// States on the current recursion path.
    on_path: HashSet<P::State>,
    /// Moves from the initial state to the state being explored.
    moves: Vec<P::Move>,
    solutions: Vec<Path<P::Move>>,
    nodes: u64,
}

impl<P: Problem> Enumerator<'_, P> {
    fn explore(&mut self, state: &P::State) -> ControlFlow<()> {
        self.nodes += 1;

        if self.problem.is_solved(state) {
            debug!(length = self.moves.len(), "dfs found solution");
            self.solutions.push(self.moves.clone());
            return if self.stop_at_first {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            };
        }

        self.on_path.insert(state.clone());
        let mut flow = ControlFlow::Continue(());

        for mv in self.problem.enumerate_moves(state) {
            let next = self.problem.apply_move(state, &mv);
            if !next.is_valid() || self.on_path.contains(&next) {
                continue;
            }

            self.moves.push(mv);
            flow = self.explore(&next);
            self.moves.pop();

            if flow.is_break() {
                break;
            }
        }

        self.on_path.remove(state);
        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::MoveList;
    use crate::puzzles::{Crossing, Hanoi, RiverCrossing};
    use crate::replay::replay;
    use smallvec::smallvec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Step {
        Right,
        Down,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Cell {
        row: u8,
        col: u8,
    }

    impl State for Cell {
        fn is_valid(&self) -> bool {
            self.row <= 1 && self.col <= 2
        }

        fn is_goal(&self, goal: &Self) -> bool {
            self == goal
        }
    }

    /// 2x3 grid walked with right/down steps only.
    struct Grid {
        start: Cell,
        goal: Cell,
    }

    impl Grid {
        fn new() -> Self {
            Self {
                start: Cell { row: 0, col: 0 },
                goal: Cell { row: 1, col: 2 },
            }
        }
    }

    impl Problem for Grid {
        type State = Cell;
        type Move = Step;

        fn initial_state(&self) -> &Cell {
            &self.start
        }

        fn goal_state(&self) -> &Cell {
            &self.goal
        }

        fn enumerate_moves(&self, _state: &Cell) -> MoveList<Step> {
            smallvec![Step::Right, Step::Down]
        }

        fn apply_move(&self, state: &Cell, mv: &Step) -> Cell {
            match mv {
                Step::Right => Cell {
                    row: state.row,
                    col: state.col + 1,
                },
                Step::Down => Cell {
                    row: state.row + 1,
                    col: state.col,
                },
            }
        }

        fn describe_move(&self, mv: &Step, _state: &Cell) -> String {
            format!("{mv:?}")
        }

        fn heuristic(&self, state: &Cell) -> u64 {
            u64::from(self.goal.row.abs_diff(state.row))
                + u64::from(self.goal.col.abs_diff(state.col))
        }
    }

    #[test]
    fn test_states_shared_between_branches_are_revisited() {
        use Step::{Down, Right};

        let solutions = solve_all(&Grid::new());
        assert_eq!(
            solutions,
            vec![
                vec![Right, Right, Down],
                vec![Right, Down, Right],
                vec![Down, Right, Right],
            ]
        );
    }

    #[test]
    fn test_solve_first_follows_move_order() {
        let first = solve_first(&Grid::new()).unwrap();
        assert_eq!(first, vec![Step::Right, Step::Right, Step::Down]);
    }

    #[test]
    fn test_river_crossing_first_solution() {
        let problem = RiverCrossing::classic();
        let path = solve_first(&problem).unwrap();

        let pairs: Vec<(u8, u8)> = path.iter().map(|c| (c.missionaries, c.cannibals)).collect();
        assert_eq!(
            pairs,
            vec![
                (0, 2),
                (0, 1),
                (0, 2),
                (0, 1),
                (2, 0),
                (1, 1),
                (2, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
            ]
        );
        assert!(replay(&problem, &path).is_ok());
    }

    #[test]
    fn test_river_crossing_all_solutions() {
        let problem = RiverCrossing::classic();
        let solutions = solve_all(&problem);

        assert_eq!(solutions.len(), 4);
        assert_eq!(solutions.first(), solve_first(&problem).as_ref());
        for path in &solutions {
            assert_eq!(path.len(), 11);
            assert!(replay(&problem, path).is_ok());
        }

        let openings: Vec<Crossing> = solutions.iter().map(|p| p[0]).collect();
        assert!(openings.iter().all(|c| c.from_left));
    }

    #[test]
    fn test_hanoi_solutions_are_valid_and_include_optimum() {
        let problem = Hanoi::new(2).unwrap();
        let solutions = solve_all(&problem);

        assert!(!solutions.is_empty());
        assert!(solutions.iter().all(|p| replay(&problem, p).is_ok()));
        assert_eq!(solutions.iter().map(Vec::len).min(), Some(3));
        assert!(solutions.contains(&solve_first(&problem).unwrap()));
    }

    #[test]
    fn test_unreachable_goal_yields_nothing() {
        let mut grid = Grid::new();
        grid.goal = Cell { row: 2, col: 0 };
        assert_eq!(solve_first(&grid), None);
        assert!(solve_all(&grid).is_empty());
    }

    #[test]
    fn test_initial_goal_yields_empty_path() {
        let mut grid = Grid::new();
        grid.goal = grid.start.clone();
        assert_eq!(solve_all(&grid), vec![Vec::<Step>::new()]);
    }
}
