//! Solver configuration (§6): the four enumerated options plus an injectable
//! RNG seed, grounded in `varisat::config::SolverConfig`'s plain-struct style
//! rather than four loose booleans threaded through function signatures.

use crate::error::{Result, SolverError};
use crate::heuristic::HeuristicKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
  pub heuristic: HeuristicKind,
  pub generate_proof: bool,
  pub eliminate_pure_literal: bool,
  pub random_restart: bool,
  /// Seed for the single RNG all randomness (sign choice, VSIDS boost) flows
  /// from, so a fixed seed reproduces the same search (§5 Ordering).
  pub seed: u64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      heuristic: HeuristicKind::Ordered,
      generate_proof: false,
      eliminate_pure_literal: false,
      random_restart: false,
      seed: 0,
    }
  }
}

impl Config {
  /// Rejects `random_restart` combined with `generate_proof` at construction
  /// time (§7 `restart_with_proof`): a forget pass could discard a learned
  /// clause the refutation DAG still depends on.
  pub fn validate(&self) -> Result<()> {
    if self.random_restart && self.generate_proof {
      log::warn!("rejecting configuration: random_restart and generate_proof are mutually exclusive");
      return Err(SolverError::RestartWithProof);
    }
    Ok(())
  }
}
