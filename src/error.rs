//! Crate-boundary error type (spec §7). Conflicts and UNSAT are control-flow
//! outcomes of `Solver::solve`, never errors; only construction-time problems
//! (malformed input, invalid configuration, I/O) surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
  #[error("clause contains literal 0, which is reserved as the DIMACS terminator")]
  MalformedClauseZeroLiteral,

  #[error("clause contains both polarities of variable {var}")]
  MalformedClauseContradictoryLiterals { var: usize },

  #[error("random_restart and generate_proof are mutually exclusive: a forget could discard a clause the refutation DAG depends on")]
  RestartWithProof,

  #[error("failed to read DIMACS input")]
  Io(#[from] std::io::Error),

  #[error("malformed DIMACS input: {0}")]
  DimacsFormat(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
