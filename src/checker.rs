//! Solution checking (collaborator, §4.J), grounded in
//! `formula_helper/solution_checker.py`'s `check_solution`.

use crate::clause::Clause;

/// Checks a total assignment (signed literals for variables `1..=n`) against
/// the original clause list: every clause's literal set must not be disjoint
/// from the solution, i.e. every clause has at least one satisfied literal.
/// Mirrors `check_solution`'s disjointness test directly.
pub fn check_solution(formula: &[Clause], solution: &[i64]) -> bool {
  formula.iter().all(|c| c.is_satisfied_by(solution))
}

#[cfg(test)]
mod test {
  use super::*;

  fn clause(ints: &[i64]) -> Clause { Clause::from_ints(ints).unwrap() }

  #[test]
  fn valid_solution_passes() {
    let formula = vec![clause(&[1, 2]), clause(&[-1, 3])];
    assert!(check_solution(&formula, &[1, 2, 3]));
  }

  #[test]
  fn invalid_solution_fails() {
    let formula = vec![clause(&[1, 2])];
    assert!(!check_solution(&formula, &[-1, -2]));
  }

  #[test]
  fn empty_formula_is_trivially_valid() {
    assert!(check_solution(&[], &[1, -2]));
  }
}
