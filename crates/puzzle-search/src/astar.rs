//! Budgeted best-first (A*) search.
//!
//! Nodes are ordered by `g + h` with ties broken by insertion order, never by
//! comparing states. Expanded states go into a closed set and are never
//! reopened. Every edge costs 1.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashSet};
use std::time::Instant;

use tracing::{debug, info, trace};

use crate::config::SearchConfig;
use crate::problem::{Path, Problem, State};
use crate::report::{SearchOutcome, SearchReport};

/// Frontier ordering key: `(priority, sequence)`, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct FrontierKey {
    priority: u64,
    sequence: u64,
}

/// A discovered, not yet expanded node.
#[derive(Debug)]
struct FrontierEntry<S> {
    key: Reverse<FrontierKey>,
    g: u64,
    state: S,
    /// Index into the path arena.
    node: usize,
}

impl<S> PartialEq for FrontierEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S> Eq for FrontierEntry<S> {}

impl<S> PartialOrd for FrontierEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for FrontierEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-heap frontier with a monotonically increasing insertion counter.
struct Frontier<S> {
    heap: BinaryHeap<FrontierEntry<S>>,
    next_sequence: u64,
    high_water: usize,
}

impl<S> Frontier<S> {
    fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_sequence: 0,
            high_water: 0,
        }
    }

    fn push(&mut self, priority: u64, g: u64, state: S, node: usize) {
        let key = FrontierKey {
            priority,
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            g,
            state,
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    fn pop(&mut self) -> Option<FrontierEntry<S>> {
        self.heap.pop()
    }
}

/// Parent links for every pushed node; index 0 is the initial state.
///
/// Paths are rebuilt from these links only when a goal is popped, instead of
/// cloning a move list into every frontier entry.
struct PathArena<M> {
    links: Vec<Option<(usize, M)>>,
}

impl<M: Clone> PathArena<M> {
    fn new() -> Self {
        Self { links: vec![None] }
    }

    fn extend(&mut self, parent: usize, mv: M) -> usize {
        self.links.push(Some((parent, mv)));
        self.links.len() - 1
    }

    fn path_to(&self, mut node: usize) -> Path<M> {
        let mut path = Vec::new();
        while let Some(Some((parent, mv))) = self.links.get(node) {
            path.push(mv.clone());
            node = *parent;
        }
        path.reverse();
        path
    }
}

/// Run A* from the problem's initial state.
///
/// Stops with [`SearchOutcome::Solved`] when a goal state is popped, or with one
/// of the three failure outcomes when the frontier empties, `max_expansions`
/// nodes have been expanded, or `timeout` has elapsed. The report always
/// carries the expansion count and elapsed time.
pub fn solve<P: Problem>(problem: &P, config: &SearchConfig) -> SearchReport<P::Move> {
    let start = Instant::now();

    info!(
        event = "search_start",
        engine = "astar",
        max_expansions = config.max_expansions(),
        timeout_ms = config.timeout().as_millis() as u64,
    );

    let initial = problem.initial_state();
    let mut frontier = Frontier::new();
    let mut closed: HashSet<P::State> = HashSet::new();
    let mut arena = PathArena::new();
    let mut expansions: u64 = 0;

    frontier.push(problem.heuristic(initial), 0, initial.clone(), 0);

    let outcome = loop {
        let Some(entry) = frontier.pop() else {
            break SearchOutcome::Unsolvable;
        };

        if expansions >= config.max_expansions() {
            break SearchOutcome::BudgetExceeded;
        }
        if start.elapsed() >= config.timeout() {
            break SearchOutcome::TimedOut;
        }

        if closed.contains(&entry.state) {
            trace!(g = entry.g, "discarding stale frontier entry");
            continue;
        }
        closed.insert(entry.state.clone());

        if problem.is_solved(&entry.state) {
            break SearchOutcome::Solved(arena.path_to(entry.node));
        }

        expansions += 1;
        for mv in problem.enumerate_moves(&entry.state) {
            let next = problem.apply_move(&entry.state, &mv);
            if !next.is_valid() || closed.contains(&next) {
                continue;
            }
            let g = entry.g + 1;
            let priority = g.saturating_add(problem.heuristic(&next));
            let node = arena.extend(entry.node, mv);
            frontier.push(priority, g, next, node);
        }
    };

    let elapsed = start.elapsed();
    let path_len = match &outcome {
        SearchOutcome::Solved(path) => Some(path.len()),
        _ => None,
    };
    info!(
        event = "search_end",
        engine = "astar",
        outcome = %outcome.kind(),
        expansions,
        elapsed_ms = elapsed.as_millis() as u64,
        path_len = ?path_len,
    );
    debug!(
        closed = closed.len(),
        frontier_peak = frontier.high_water,
        nodes = arena.links.len(),
        "astar statistics"
    );

    SearchReport {
        outcome,
        expansions,
        elapsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::MoveList;
    use crate::puzzles::{Hanoi, RiverCrossing, SlidingTiles};
    use crate::replay::replay;
    use smallvec::smallvec;
    use std::thread;
    use std::time::Duration;

    /// Walk along `0..=len` one step at a time.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    struct Pos {
        at: i64,
        len: i64,
    }

    impl State for Pos {
        fn is_valid(&self) -> bool {
            (0..=self.len).contains(&self.at)
        }

        fn is_goal(&self, goal: &Self) -> bool {
            self.at == goal.at
        }
    }

    struct Line {
        initial: Pos,
        goal: Pos,
        delay: Duration,
    }

    impl Line {
        fn new(len: i64, from: i64, to: i64) -> Self {
            Self {
                initial: Pos { at: from, len },
                goal: Pos { at: to, len },
                delay: Duration::ZERO,
            }
        }
    }

    impl Problem for Line {
        type State = Pos;
        type Move = i64;

        fn initial_state(&self) -> &Pos {
            &self.initial
        }

        fn goal_state(&self) -> &Pos {
            &self.goal
        }

        fn enumerate_moves(&self, _state: &Pos) -> MoveList<i64> {
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            smallvec![1, -1]
        }

        fn apply_move(&self, state: &Pos, mv: &i64) -> Pos {
            Pos {
                at: state.at + mv,
                len: state.len,
            }
        }

        fn describe_move(&self, mv: &i64, _state: &Pos) -> String {
            format!("step {mv:+}")
        }

        fn heuristic(&self, state: &Pos) -> u64 {
            (self.goal.at - state.at).unsigned_abs()
        }
    }

    /// Same problem with the heuristic switched off (uniform-cost search).
    struct Blind<P>(P);

    impl<P: Problem> Problem for Blind<P> {
        type State = P::State;
        type Move = P::Move;

        fn initial_state(&self) -> &P::State {
            self.0.initial_state()
        }

        fn goal_state(&self) -> &P::State {
            self.0.goal_state()
        }

        fn enumerate_moves(&self, state: &P::State) -> MoveList<P::Move> {
            self.0.enumerate_moves(state)
        }

        fn apply_move(&self, state: &P::State, mv: &P::Move) -> P::State {
            self.0.apply_move(state, mv)
        }

        fn describe_move(&self, mv: &P::Move, state: &P::State) -> String {
            self.0.describe_move(mv, state)
        }

        fn heuristic(&self, _state: &P::State) -> u64 {
            0
        }
    }

    fn budget(max_expansions: u64) -> SearchConfig {
        SearchConfig::new(max_expansions, Duration::from_secs(60)).unwrap()
    }

    #[test]
    fn test_frontier_breaks_ties_by_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(5, 0, "first", 0);
        frontier.push(3, 0, "best", 1);
        frontier.push(5, 0, "second", 2);
        frontier.push(5, 0, "third", 3);

        let order: Vec<&str> = std::iter::from_fn(|| frontier.pop().map(|e| e.state)).collect();
        assert_eq!(order, vec!["best", "first", "second", "third"]);
        assert_eq!(frontier.high_water, 4);
    }

    #[test]
    fn test_path_arena_rebuilds_moves_in_order() {
        let mut arena = PathArena::new();
        let a = arena.extend(0, 'a');
        let b = arena.extend(a, 'b');
        let _sibling = arena.extend(a, 'x');
        let c = arena.extend(b, 'c');
        assert_eq!(arena.path_to(c), vec!['a', 'b', 'c']);
        assert!(arena.path_to(0).is_empty());
    }

    #[test]
    fn test_initial_goal_needs_no_expansion() {
        let report = solve(&Line::new(5, 3, 3), &budget(10));
        assert_eq!(report.outcome, SearchOutcome::Solved(vec![]));
        assert_eq!(report.expansions, 0);
    }

    #[test]
    fn test_line_solved_with_direct_path() {
        let report = solve(&Line::new(10, 2, 7), &budget(100));
        assert_eq!(report.path(), Some(&[1, 1, 1, 1, 1][..]));
        assert_eq!(report.expansions, 5);
    }

    #[test]
    fn test_exhausted_frontier_is_unsolvable() {
        // Goal lies outside the valid range, so every valid state gets expanded.
        let report = solve(&Line::new(5, 0, 9), &budget(1_000));
        assert_eq!(report.outcome, SearchOutcome::Unsolvable);
        assert_eq!(report.expansions, 6);
    }

    #[test]
    fn test_single_expansion_budget_is_not_unsolvable() {
        let report = solve(&Line::new(5, 0, 5), &budget(1));
        assert_eq!(report.outcome, SearchOutcome::BudgetExceeded);
        assert_eq!(report.expansions, 1);
    }

    #[test]
    fn test_deadline_reports_timed_out() {
        let mut line = Line::new(100, 0, 100);
        line.delay = Duration::from_millis(5);
        let config = SearchConfig::new(1_000, Duration::from_millis(1)).unwrap();

        let report = solve(&line, &config);
        assert_eq!(report.outcome, SearchOutcome::TimedOut);
        assert!(report.expansions <= 1);
        assert!(report.elapsed >= Duration::from_millis(1));
    }

    #[test]
    fn test_expansions_never_exceed_budget() {
        for max in 1..12 {
            let report = solve(&Hanoi::new(3).unwrap(), &budget(max));
            assert!(report.expansions <= max);
        }
    }

    #[test]
    fn test_larger_budget_keeps_success() {
        let problem = Hanoi::new(3).unwrap();
        let first_success = (1..200)
            .find(|&max| solve(&problem, &budget(max)).is_solved())
            .unwrap();
        for max in first_success..first_success + 20 {
            let report = solve(&problem, &budget(max));
            assert_eq!(report.path().map(<[_]>::len), Some(7));
        }
    }

    #[test]
    fn test_river_crossing_minimal_solution_has_eleven_moves() {
        let problem = RiverCrossing::classic();
        let report = solve(&problem, &SearchConfig::default());
        let path = report.into_path().unwrap();
        assert_eq!(path.len(), 11);
        assert!(replay(&problem, &path).is_ok());
    }

    #[test]
    fn test_hanoi_three_disks_takes_seven_moves() {
        let problem = Hanoi::new(3).unwrap();
        let path = solve(&problem, &SearchConfig::default()).into_path().unwrap();
        assert_eq!(path.len(), 7);
        assert!(replay(&problem, &path).is_ok());
    }

    #[test]
    fn test_hanoi_four_disks_is_optimal() {
        let problem = Hanoi::new(4).unwrap();
        let path = solve(&problem, &SearchConfig::default()).into_path().unwrap();
        assert_eq!(path.len(), 15);
    }

    #[test]
    fn test_sliding_tiles_matches_uniform_cost_length() {
        let problem = SlidingTiles::scrambled(3, 3, 12, 7).unwrap();
        let config = budget(200_000);

        let guided = solve(&problem, &config).into_path().unwrap();
        let blind = solve(&Blind(problem.clone()), &config).into_path().unwrap();

        assert_eq!(guided.len(), blind.len());
        assert!(guided.len() <= 12);
        assert!(replay(&problem, &guided).is_ok());
    }

    #[test]
    fn test_repeated_runs_return_identical_paths() {
        let problem = SlidingTiles::scrambled(3, 3, 10, 42).unwrap();
        let first = solve(&problem, &SearchConfig::default()).into_path();
        let second = solve(&problem, &SearchConfig::default()).into_path();
        assert!(first.is_some());
        assert_eq!(first, second);
    }
}
