//! CLI entry point: parses a DIMACS CNF file, runs the solver, and writes the
//! `_sol.txt` / `_stats.txt` / `_proof.txt` outputs the Python driver's
//! `main.py`/`solve()` produces. Grounded in the teacher's single-threaded
//! `bin/solve_dimacs.rs` path and in `varisat-cli`/`s3sat-driver`'s
//! `clap`-derive argument parsing.

use cdcl_sat::checker;
use cdcl_sat::config::Config;
use cdcl_sat::heuristic::HeuristicKind;
use cdcl_sat::proof::Proof;
use cdcl_sat::solver::{SolveResult, Solver};
use clap::Parser;
use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

/// A CDCL SAT solver over DIMACS CNF input.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
  /// Path to a DIMACS CNF input file.
  input: PathBuf,

  /// Branching heuristic.
  #[arg(long, value_enum, default_value_t = HeuristicKind::Ordered)]
  heuristic: HeuristicKind,

  /// Emit a resolution refutation on UNSAT. Mutually exclusive with `--random-restart`.
  #[arg(long)]
  generate_proof: bool,

  /// Run pure-literal elimination before search.
  #[arg(long)]
  eliminate_pure_literal: bool,

  /// Periodically restart and discard low-activity learned clauses.
  #[arg(long)]
  random_restart: bool,

  /// RNG seed, for a reproducible decision sequence.
  #[arg(long, default_value_t = 0)]
  seed: u64,
}

fn main() {
  env_logger::init();
  let args = Args::parse();

  let config = Config {
    heuristic: args.heuristic,
    generate_proof: args.generate_proof,
    eliminate_pure_literal: args.eliminate_pure_literal,
    random_restart: args.random_restart,
    seed: args.seed,
  };

  let mut solver = match Solver::from_dimacs(&args.input, config) {
    Ok(solver) => solver,
    Err(e) => {
      log::warn!("failed to build solver: {}", e);
      eprintln!("error: {}", e);
      std::process::exit(1);
    },
  };

  let start = Instant::now();
  let result = solver.solve();
  let elapsed = start.elapsed();

  let stem = args.input.to_string_lossy().trim_end_matches(".cnf").to_string();

  match &result {
    SolveResult::Sat(assignment) => {
      log::info!("SATISFIABLE");
      let rendered = format!(
        "SATISFIABLE {} 0",
        assignment.iter().map(i64::to_string).collect::<Vec<_>>().join(" ")
      );
      let sol_path = format!("{}_sol.txt", stem);
      if let Err(e) = fs::write(&sol_path, &rendered) {
        log::warn!("failed to write {}: {}", sol_path, e);
      }

      let original = &solver.database().formula[..solver.database().num_original()];
      if !checker::check_solution(original, assignment) {
        eprintln!("error: solver produced an invalid solution");
        std::process::exit(1);
      }
    },
    SolveResult::Unsat => {
      log::info!("UNSATISFIABLE");
      if config.generate_proof {
        let proof_path = format!("{}_proof.txt", stem);
        match fs::File::create(&proof_path) {
          Ok(file) => {
            let mut proof = Proof::from_database(solver.database());
            if let Err(e) = proof.write(BufWriter::new(file)) {
              log::warn!("failed to write {}: {}", proof_path, e);
            }
          },
          Err(e) => log::warn!("failed to create {}: {}", proof_path, e),
        }
      }
    },
  }

  let stats_path = format!("{}_stats.txt", stem);
  match fs::File::create(&stats_path) {
    Ok(file) => {
      let total_clauses = solver.database().formula.len();
      let history = solver.history_snapshot();
      let report = solver.stats.write_report(
        BufWriter::new(file),
        &args.input.to_string_lossy(),
        &config.heuristic.to_string(),
        elapsed,
        total_clauses,
        &history,
      );
      if let Err(e) = report {
        log::warn!("failed to write {}: {}", stats_path, e);
      }
    },
    Err(e) => log::warn!("failed to create {}: {}", stats_path, e),
  }
}
