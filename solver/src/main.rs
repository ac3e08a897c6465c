//! hashi-solver: solve a Hashiwokakero puzzle file with the genetic search.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod puzzle;
mod render;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use hashigene::{ConfigurationError, HashiSolver, Parameters, SolveError, SolverState};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::puzzle::{read_puzzle, PuzzleError};
use crate::render::{render_cells, render_incomplete};

/// Solve a Hashiwokakero (Bridges) puzzle with a genetic algorithm
#[derive(Parser, Debug)]
#[command(name = "hashi-solver")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Puzzle file, one row per line
    puzzle: PathBuf,

    /// Random seed
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Candidates per generation
    #[arg(short, long)]
    population: Option<usize>,

    /// Give up after this many generations
    #[arg(short, long)]
    generations: Option<usize>,

    /// Probability that a pair of parents recombines
    #[arg(long)]
    crossover: Option<f64>,

    /// Per-bit mutation probability
    #[arg(long)]
    mutation: Option<f64>,

    /// Fraction of each generation kept unchanged
    #[arg(long)]
    elitism: Option<f64>,

    /// Repair the weakest candidates every N generations
    #[arg(long, conflicts_with = "no_wisdom")]
    wisdom_every: Option<usize>,

    /// Never repair candidates
    #[arg(long)]
    no_wisdom: bool,

    /// JSON file of parameters; flags override its fields
    #[arg(long)]
    params: Option<PathBuf>,

    /// Log every generation
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Puzzle(#[from] PuzzleError),
    #[error("cannot read {path}: {source}")]
    Params {
        path: PathBuf,
        source: io::Error,
    },
    #[error("bad parameter file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

impl Args {
    fn parameters(&self) -> Result<Parameters, CliError> {
        let mut parameters = match &self.params {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|source| CliError::Params { path: path.clone(), source })?;
                serde_json::from_str(&text)?
            }
            None => Parameters::default(),
        };

        if let Some(size) = self.population {
            parameters.population_size = size;
        }
        if let Some(generations) = self.generations {
            parameters.max_generations = generations;
        }
        if let Some(p) = self.crossover {
            parameters.crossover_prob = p;
        }
        if let Some(p) = self.mutation {
            parameters.mutation_prob = p;
        }
        if let Some(p) = self.elitism {
            parameters.elitism_perc = p;
        }
        if let Some(every) = self.wisdom_every {
            parameters.with_wisdom = true;
            parameters.gens_per_wisdom = every;
        }
        if self.no_wisdom {
            parameters.with_wisdom = false;
        }

        parameters.validate()?;
        Ok(parameters)
    }
}

fn run(args: &Args) -> Result<bool, CliError> {
    let parameters = args.parameters()?;
    let grid = read_puzzle(&args.puzzle)?;

    let mut solver = HashiSolver::seeded(args.seed, parameters);
    solver.try_initialize(&grid)?;
    info!(seed = args.seed, ?parameters, "starting search");

    if let Some(view) = solver.view() {
        println!("{}", render_cells(&view.cells));
    }

    while !solver.try_update(&parameters)?.is_terminal() {
        if solver.generation() % 100 == 0 {
            info!(generation = solver.generation(), best = solver.best_percentage(), "progress");
        }
    }

    let Some(view) = solver.view() else {
        return Err(SolveError::NotInitialized.into());
    };
    print!("{}", render_cells(&view.cells));

    let solved = solver.state() == SolverState::Solved;
    if solved {
        println!("solved after {} generations", solver.generation());
    } else {
        print!("{}", render_incomplete(&view));
        println!("gave up after {} generations, best fitness {:.2}%", solver.generation(), solver.best_percentage());
    }

    Ok(solved)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(io::stderr)
        .init();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
