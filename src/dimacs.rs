//! DIMACS CNF parsing (collaborator, §4.I / §6), grounded in the teacher's
//! `BufReader` line scan and in `formula_helper/parser.py`.

use crate::clause::Clause;
use crate::error::{Result, SolverError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses a DIMACS CNF formula from any buffered reader (a `File`, a test
/// `Cursor`, ...), generalizing the teacher's file-only parser the way
/// `varisat-dimacs` takes a generic reader.
///
/// `c`-prefixed lines are comments and are skipped. The `p cnf N M` header
/// supplies `num_variables` (`N`); `M` is read only as a `Vec::reserve` hint
/// and never checked against the actual clause count, matching the original.
/// Remaining lines are whitespace-separated signed integers, `0`-terminated,
/// accumulated into the current clause and flushed on `0`. A clause
/// containing `0` as a real literal can't occur by construction; a clause
/// with both polarities of a variable is rejected per §7.
pub fn parse<R: BufRead>(reader: R) -> Result<(Vec<Clause>, usize)> {
  let mut clauses = vec![];
  let mut num_variables = 0usize;
  let mut current: Vec<i64> = vec![];

  for line in reader.lines() {
    let line = line?;
    let line = line.trim();
    if line.is_empty() || line.starts_with('c') {
      continue;
    }
    if line.starts_with("p cnf") {
      let mut fields = line.split_whitespace().skip(2);
      num_variables = fields
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| SolverError::DimacsFormat("malformed 'p cnf N M' header".into()))?;
      if let Some(num_clauses) = fields.next().and_then(|v| v.parse::<usize>().ok()) {
        clauses.reserve(num_clauses);
      }
      continue;
    }
    for token in line.split_whitespace() {
      let value: i64 = token
        .parse()
        .map_err(|_| SolverError::DimacsFormat(format!("not an integer: {:?}", token)))?;
      if value == 0 {
        clauses.push(Clause::from_ints(&current)?);
        current.clear();
      } else {
        current.push(value);
      }
    }
  }
  Ok((clauses, num_variables))
}

/// Reads and parses a DIMACS CNF file by path.
pub fn from_dimacs(path: impl AsRef<Path>) -> Result<(Vec<Clause>, usize)> {
  let file = File::open(path)?;
  parse(BufReader::new(file))
}

#[cfg(test)]
mod test {
  use super::*;
  use std::io::Cursor;

  fn parse_str(s: &str) -> Result<(Vec<Clause>, usize)> { parse(Cursor::new(s.as_bytes())) }

  #[test]
  fn parses_header_and_clauses() {
    let (clauses, n) = parse_str("c a comment\np cnf 3 2\n1 -2 0\n2 3 0\n").unwrap();
    assert_eq!(n, 3);
    assert_eq!(clauses.len(), 2);
    assert_eq!(clauses[0].literals.iter().map(|l| l.raw()).collect::<Vec<_>>(), vec![1, -2]);
  }

  #[test]
  fn clause_may_span_multiple_lines() {
    let (clauses, _) = parse_str("p cnf 3 1\n1 -2\n3 0\n").unwrap();
    assert_eq!(clauses.len(), 1);
    assert_eq!(clauses[0].len(), 3);
  }

  #[test]
  fn reserve_hint_is_not_validated_against_actual_clause_count() {
    let (clauses, _) = parse_str("p cnf 1 99\n1 0\n").unwrap();
    assert_eq!(clauses.len(), 1);
  }

  #[test]
  fn rejects_contradictory_clause() {
    assert!(parse_str("p cnf 1 1\n1 -1 0\n").is_err());
  }

  #[test]
  fn rejects_non_integer_token() {
    assert!(parse_str("p cnf 1 1\nfoo 0\n").is_err());
  }
}
