//! monkey-drv - Interpreter Driver
//!
//! Entry point and orchestrator for the interpreter pipeline:
//!
//! ```text
//! Source text
//!      │
//!      ▼
//! [monkey-par] ──▶ AST        (lexing happens inside the parser)
//!      │
//!      ▼
//! [monkey-eval] ──▶ Object
//!      │
//!      ▼
//! printed result / error discriminant / average duration
//! ```
//!
//! With no arguments the driver runs a fixed naive-Fibonacci program;
//! `--bench` times it instead of printing its value. `RUST_LOG=debug`
//! surfaces the collector's per-sweep log lines.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use monkey_eval::Evaluator;
use monkey_par::Program;

/// The fixed benchmark program: naive doubly-recursive Fibonacci, heavy
/// on call-environment allocation.
pub const FIB_PROGRAM: &str = "
let fib = fn(x) {
    if (x < 3) {
        1
    } else {
        fib(x - 1) + fib(x - 2)
    }
};
fib(25)
";

/// Command line configuration.
#[derive(Debug, Parser)]
#[command(name = "monkey", about = "Tree-walking interpreter for the Monkey language", version)]
pub struct Config {
    /// Source file to run (defaults to the built-in Fibonacci program)
    pub file: Option<PathBuf>,

    /// Measure average evaluation time instead of printing the result
    #[arg(long)]
    pub bench: bool,

    /// Number of benchmark iterations
    #[arg(long, default_value_t = 10)]
    pub iterations: u32,
}

/// Parses arguments, initializes logging, and runs.
pub fn main() -> Result<()> {
    env_logger::init();
    let config = Config::parse();
    run(&config)
}

/// Runs the configured workload and prints the outcome.
pub fn run(config: &Config) -> Result<()> {
    let source = match &config.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => FIB_PROGRAM.to_string(),
    };

    if config.bench {
        let average = bench_source(&source, config.iterations)?;
        println!("average: {:?}", average);
    } else {
        println!("{}", run_source(&source)?);
    }

    Ok(())
}

/// Parses and evaluates `source`, rendering the result.
pub fn run_source(source: &str) -> Result<String> {
    let program = parse_source(source)?;
    let mut evaluator = Evaluator::new();
    let result = evaluator
        .evaluate(&program)
        .map_err(|e| anyhow!("eval error: {}", e))?;
    Ok(result.to_string())
}

/// Evaluates `source` repeatedly and returns the average wall-clock time.
///
/// The parse is done once up front; only evaluation is timed. Each
/// iteration gets a fresh evaluator so heap reuse does not flatter later
/// runs.
pub fn bench_source(source: &str, iterations: u32) -> Result<Duration> {
    let program = parse_source(source)?;
    let iterations = iterations.max(1);

    let mut total = Duration::ZERO;
    for i in 0..iterations {
        let mut evaluator = Evaluator::new();
        let start = Instant::now();
        evaluator
            .evaluate(&program)
            .map_err(|e| anyhow!("eval error: {}", e))?;
        let elapsed = start.elapsed();
        log::debug!("iteration {}: {:?}", i, elapsed);
        total += elapsed;
    }

    Ok(total / iterations)
}

fn parse_source(source: &str) -> Result<Program> {
    monkey_par::parse(source).map_err(|e| anyhow!("parse error: {}", e))
}
