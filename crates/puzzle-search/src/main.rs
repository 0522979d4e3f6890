//! CLI entry point for the puzzle search engines.
//!
//! Usage:
//!   puzzle-search solve <PUZZLE> [options]
//!
//! Puzzles: river-crossing, hanoi, blocks, sliding, fifteen
//!
//! Options:
//!   --engine <astar|dfs-first|dfs-all>  Search engine (default: astar)
//!   --max-expansions <n>                A* expansion budget (default: 10000)
//!   --timeout-ms <ms>                   A* deadline (default: 120000)
//!   --config <file.json>                Load budgets from JSON; flags override it
//!   --simplify                          Drop immediately reversed move pairs
//!   --json                              Print a JSON summary instead of a trace

use std::fmt::Display;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use puzzle_search::puzzles::{BlocksWorld, Hanoi, RiverCrossing, SlidingTiles};
use puzzle_search::{
    astar, dfs, simplify, verify_path, ConfigError, OutcomeKind, Path, Problem, PuzzleError,
    PuzzleKind, ReversibleMove, SearchConfig, Step,
};

#[derive(Parser)]
#[command(name = "puzzle-search")]
#[command(about = "Solve small combinatorial puzzles with depth-first or A* search")]
#[command(version)]
struct Cli {
    /// Log engine progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one puzzle instance and print the solution
    Solve(SolveArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Puzzle to solve
    #[arg(value_enum)]
    puzzle: PuzzleKind,

    /// Search engine. `dfs-all` lists every cycle-free path, which is only
    /// practical for river-crossing and small hanoi instances
    #[arg(long, value_enum, default_value = "astar")]
    engine: Engine,

    /// Missionaries (and cannibals) in the river crossing
    #[arg(long, default_value = "3")]
    group_size: u8,

    /// Disks in the tower
    #[arg(long, default_value = "3")]
    disks: u8,

    /// Sliding board width
    #[arg(long, default_value = "3")]
    width: usize,

    /// Sliding board height
    #[arg(long, default_value = "3")]
    height: usize,

    /// Random slides applied to the goal to build a sliding instance
    #[arg(long, default_value = "20")]
    scramble: usize,

    /// Seed for the scramble
    #[arg(long, default_value = "0")]
    seed: u64,

    /// JSON file with `max_expansions` and `timeout_ms`
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum A* node expansions
    #[arg(long)]
    max_expansions: Option<u64>,

    /// A* deadline in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Remove immediately reversed move pairs from the solution
    #[arg(long)]
    simplify: bool,

    /// Print a JSON summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
enum Engine {
    Astar,
    DfsFirst,
    DfsAll,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Puzzle(#[from] PuzzleError),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Output format for `--json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput<M> {
    puzzle: PuzzleKind,
    engine: Engine,
    outcome: OutcomeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution: Option<Path<M>>,
    steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    solution_length: Option<usize>,
    solutions_found: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    expansions: Option<u64>,
    elapsed_ms: u64,
}

/// What any engine produced, flattened for printing.
struct EngineRun<M> {
    outcome: OutcomeKind,
    solutions: Vec<Path<M>>,
    expansions: Option<u64>,
    elapsed: Duration,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Solve(args) => match solve(&args) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(2)
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(args: &SolveArgs) -> Result<SearchConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };
    if let Some(max_expansions) = args.max_expansions {
        config = config.with_max_expansions(max_expansions)?;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout(Duration::from_millis(timeout_ms))?;
    }
    Ok(config)
}

/// Build the selected puzzle and solve it. Returns whether a solution was found.
fn solve(args: &SolveArgs) -> Result<bool, CliError> {
    let config = build_config(args)?;
    info!(puzzle = %args.puzzle, engine = ?args.engine, "solving");
    if args.engine == Engine::DfsAll && args.puzzle.has_many_simple_paths() {
        warn!(
            puzzle = %args.puzzle,
            "dfs-all enumerates every cycle-free path here and may not finish"
        );
    }

    match args.puzzle {
        PuzzleKind::RiverCrossing => run(&RiverCrossing::new(args.group_size)?, args, &config),
        PuzzleKind::Hanoi => run(&Hanoi::new(args.disks)?, args, &config),
        PuzzleKind::Blocks => run(&BlocksWorld::classic()?, args, &config),
        PuzzleKind::Sliding => run(
            &SlidingTiles::scrambled(args.width, args.height, args.scramble, args.seed)?,
            args,
            &config,
        ),
        PuzzleKind::Fifteen => run(
            &SlidingTiles::fifteen(args.scramble, args.seed)?,
            args,
            &config,
        ),
    }
}

fn run<P>(problem: &P, args: &SolveArgs, config: &SearchConfig) -> Result<bool, CliError>
where
    P: Problem,
    P::State: Display,
    P::Move: ReversibleMove + Serialize,
{
    let mut result = run_engine(problem, args.engine, config);

    if args.simplify {
        for path in &mut result.solutions {
            *path = simplify(path);
        }
    }

    // dfs-all reports every path; the trace shows the shortest one.
    let shown = result.solutions.iter().min_by_key(|p| p.len()).cloned();
    if let Some(path) = &shown {
        if !verify_path(problem, path) {
            warn!(length = path.len(), "solution does not replay to the goal");
        }
    }
    let steps = shown
        .as_deref()
        .map(|path| trace(problem, path))
        .unwrap_or_default();

    if args.json {
        let output = SolveOutput {
            puzzle: args.puzzle,
            engine: args.engine,
            outcome: result.outcome,
            solution_length: shown.as_ref().map(Vec::len),
            solution: shown,
            steps: steps.iter().map(|s| s.description.clone()).collect(),
            solutions_found: result.solutions.len(),
            expansions: result.expansions,
            elapsed_ms: result.elapsed.as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_trace(problem.initial_state(), &steps);
        print_summary(&result);
    }

    Ok(result.outcome == OutcomeKind::Solved)
}

fn run_engine<P: Problem>(
    problem: &P,
    engine: Engine,
    config: &SearchConfig,
) -> EngineRun<P::Move> {
    let start = Instant::now();
    match engine {
        Engine::Astar => {
            let report = astar::solve(problem, config);
            EngineRun {
                outcome: report.outcome.kind(),
                expansions: Some(report.expansions),
                elapsed: report.elapsed,
                solutions: report.into_path().into_iter().collect(),
            }
        }
        Engine::DfsFirst => from_paths(dfs::solve_first(problem).into_iter().collect(), start),
        Engine::DfsAll => from_paths(dfs::solve_all(problem), start),
    }
}

fn from_paths<M>(solutions: Vec<Path<M>>, start: Instant) -> EngineRun<M> {
    let outcome = if solutions.is_empty() {
        OutcomeKind::Unsolvable
    } else {
        OutcomeKind::Solved
    };
    EngineRun {
        outcome,
        solutions,
        expansions: None,
        elapsed: start.elapsed(),
    }
}

/// Walk `path` without validation so that even a broken path can be shown.
fn trace<P: Problem>(problem: &P, path: &[P::Move]) -> Vec<Step<P::State>> {
    let mut state = problem.initial_state().clone();
    path.iter()
        .map(|mv| {
            let description = problem.describe_move(mv, &state);
            state = problem.apply_move(&state, mv);
            Step {
                description,
                state: state.clone(),
            }
        })
        .collect()
}

fn print_trace<S: Display>(initial: &S, steps: &[Step<S>]) {
    println!("Initial state:\n{initial}");
    for (i, step) in steps.iter().enumerate() {
        println!("\nStep {}: {}\n{}", i + 1, step.description, step.state);
    }
}

fn print_summary<M>(result: &EngineRun<M>) {
    println!();
    match result.outcome {
        OutcomeKind::Solved if result.solutions.len() > 1 => {
            let mut lengths: Vec<usize> = result.solutions.iter().map(Vec::len).collect();
            lengths.sort_unstable();
            println!(
                "Found {} solutions (lengths {:?}); showing the shortest.",
                result.solutions.len(),
                lengths
            );
        }
        OutcomeKind::Solved => {
            let moves = result.solutions.first().map_or(0, Vec::len);
            println!("Solved in {moves} moves.");
        }
        OutcomeKind::Unsolvable => println!("No solution exists."),
        OutcomeKind::BudgetExceeded => println!("Gave up: expansion budget exhausted."),
        OutcomeKind::TimedOut => println!("Gave up: deadline reached."),
    }
    match result.expansions {
        Some(expansions) => println!(
            "Expansions: {expansions}, time: {:.3}s",
            result.elapsed.as_secs_f64()
        ),
        None => println!("Time: {:.3}s", result.elapsed.as_secs_f64()),
    }
}
