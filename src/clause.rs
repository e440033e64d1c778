//! Clauses and the clause-status oracle (spec component B, §4.B).

use crate::assignment::Assignment;
use crate::error::SolverError;
use crate::literal::Literal;
use std::fmt;

/// An unordered collection of distinct literals, no variable appearing both
/// positively and negatively. The empty clause `[]` represents the DIMACS `[0]`
/// sentinel, only ever produced at UNSAT when proof generation is enabled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
  pub literals: Vec<Literal>,
}

/// Outcome of evaluating a clause under the current partial assignment (§4.B).
/// SAT dominates: if any literal is true the clause is SAT even if others are
/// also unassigned or false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseStatus {
  Sat,
  Unsat,
  Unit(Literal),
  Undetermined,
}

impl Clause {
  pub fn new(literals: Vec<Literal>) -> Self { Clause { literals } }

  /// Builds a clause from raw DIMACS integers (no trailing 0), rejecting the
  /// zero literal and contradictory (tautological) variables per §7.
  pub fn from_ints(ints: &[i64]) -> Result<Self, SolverError> {
    let mut literals = Vec::with_capacity(ints.len());
    for &raw in ints {
      if raw == 0 {
        return Err(SolverError::MalformedClauseZeroLiteral);
      }
      literals.push(Literal::new(raw));
    }
    let mut seen_pos: Vec<usize> = vec![];
    let mut seen_neg: Vec<usize> = vec![];
    for lit in &literals {
      if lit.is_positive() {
        seen_pos.push(lit.var());
      } else {
        seen_neg.push(lit.var());
      }
    }
    for var in &seen_pos {
      if seen_neg.contains(var) {
        return Err(SolverError::MalformedClauseContradictoryLiterals { var: *var });
      }
    }
    Ok(Clause::new(literals))
  }

  pub fn is_empty(&self) -> bool { self.literals.is_empty() }

  pub fn len(&self) -> usize { self.literals.len() }

  /// The empty clause, i.e. DIMACS `[0]`, only produced at UNSAT with proofs enabled.
  pub fn empty() -> Self { Clause::new(vec![]) }

  /// Canonical (sorted) form used as the dedup key in the clause database.
  pub fn canonical(&self) -> Vec<Literal> {
    let mut lits = self.literals.clone();
    lits.sort_unstable();
    lits
  }

  /// Evaluates this clause's status under `assignment` (§4.B).
  pub fn status(&self, assignment: &Assignment) -> ClauseStatus {
    let mut unit_lit = None;
    let mut num_false = 0;
    for &lit in &self.literals {
      match assignment.value_of(lit) {
        Some(true) => return ClauseStatus::Sat,
        Some(false) => num_false += 1,
        None => unit_lit = Some(lit),
      }
    }
    if num_false == self.literals.len() {
      ClauseStatus::Unsat
    } else if num_false + 1 == self.literals.len() {
      ClauseStatus::Unit(unit_lit.expect("one unassigned literal implies unit_lit is set"))
    } else {
      ClauseStatus::Undetermined
    }
  }

  /// Whether this clause is satisfied by a *total* assignment given as signed
  /// integers (used by the solution checker, §4.J).
  pub fn is_satisfied_by(&self, solution: &[i64]) -> bool {
    self.literals.iter().any(|lit| solution.contains(&lit.raw()))
  }

  /// Resolution of `self` against `other` (§4.D, mirrors the behavioral
  /// source's `resolve`): start from `self`'s literals, then for each literal
  /// of `other`, cancel it against its complement if present, else union it
  /// in. Unlike textbook single-pivot resolution this cancels *any*
  /// complementary pair encountered, not only a designated pivot variable --
  /// that is what the original implementation does and what `analyze`/the
  /// proof renderer both rely on.
  pub fn resolve(&self, other: &Clause) -> Clause {
    let mut out: Vec<Literal> = self.literals.clone();
    for &lit in &other.literals {
      if let Some(pos) = out.iter().position(|l| *l == !lit) {
        out.remove(pos);
      } else if !out.contains(&lit) {
        out.push(lit);
      }
    }
    Clause::new(out)
  }
}

impl fmt::Display for Clause {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "(")?;
    for (i, lit) in self.literals.iter().enumerate() {
      if i > 0 {
        write!(f, " | ")?;
      }
      write!(f, "{}", lit)?;
    }
    write!(f, ")")
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::assignment::Assignment;

  fn clause(ints: &[i64]) -> Clause { Clause::from_ints(ints).unwrap() }

  #[test]
  fn rejects_zero_literal() {
    assert!(Clause::from_ints(&[1, 0, 2]).is_err());
  }

  #[test]
  fn rejects_contradictory_clause() {
    assert!(Clause::from_ints(&[1, -1]).is_err());
  }

  #[test]
  fn status_transitions() {
    let c = clause(&[1, -2, 3]);
    let mut a = Assignment::new(3);
    assert_eq!(c.status(&a), ClauseStatus::Undetermined);
    a.assign(Literal::from(-1i32), crate::assignment::NO_ANTECEDENT, 0);
    a.assign(Literal::from(2i32), 0, 0);
    // 1 is false, -2 is false (2 is true) -> remaining unassigned literal is 3
    assert_eq!(c.status(&a), ClauseStatus::Unit(Literal::from(3i32)));
    a.assign(Literal::from(-3i32), 0, 0);
    assert_eq!(c.status(&a), ClauseStatus::Unsat);
  }

  #[test]
  fn sat_dominates() {
    let c = clause(&[1, -2]);
    let mut a = Assignment::new(2);
    a.assign(Literal::from(1i32), crate::assignment::NO_ANTECEDENT, 0);
    a.assign(Literal::from(2i32), 0, 0);
    assert_eq!(c.status(&a), ClauseStatus::Sat);
  }

  #[test]
  fn resolve_cancels_pivot() {
    let a = clause(&[1, 2]);
    let b = clause(&[-2, 3]);
    let r = a.resolve(&b);
    let mut vars: Vec<i64> = r.literals.iter().map(|l| l.raw()).collect();
    vars.sort_unstable();
    assert_eq!(vars, vec![1, 3]);
  }
}
