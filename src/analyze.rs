//! First-UIP conflict analysis (spec component D, §4.D).

use crate::assignment::{Assignment, NO_ANTECEDENT};
use crate::clause::Clause;
use crate::database::ClauseDatabase;
use crate::literal::Literal;

/// Result of analyzing a conflict: either the empty clause (UNSAT at this
/// decision level) or a learned clause with its backtrack level.
pub enum AnalysisOutcome {
  Unsat { parents: Vec<usize> },
  Learned { clause: Clause, parents: Vec<usize>, backtrack_level: usize },
}

/// Runs the First-UIP resolution cut over the conflict at `conflict_id`,
/// discovered at decision level `level` (§4.D). `level` must be >= 1 for a
/// genuine First-UIP stop; callers are expected to treat `level == 0`
/// conflicts specially only insofar as the resulting learned clause, if any,
/// backtracks to 0 -- the cut itself runs unmodified (matching the behavioral
/// source, which keeps resolving at level 0 until the clause empties out).
pub fn analyze(
  db: &ClauseDatabase,
  assignment: &Assignment,
  conflict_id: usize,
  level: usize,
) -> AnalysisOutcome {
  let mut learnt = db.get(conflict_id).clone();
  let mut parents = vec![conflict_id];

  loop {
    let num_current_level_lits = learnt
      .literals
      .iter()
      .filter(|lit| assignment.level(lit.var()) == level as i64)
      .count();

    let latest = find_latest_assignment(assignment, level, &learnt);
    let Some(latest) = latest else { break };

    if num_current_level_lits == 1 && level != 0 {
      break;
    }

    let antecedent_id = assignment.antecedent(latest.var());
    debug_assert_ne!(antecedent_id, NO_ANTECEDENT, "find_latest_assignment only returns propagated literals");
    let antecedent_clause = db.get(antecedent_id as usize).clone();
    learnt = learnt.resolve(&antecedent_clause);
    parents.push(antecedent_id as usize);
  }

  if learnt.is_empty() {
    return AnalysisOutcome::Unsat { parents };
  }

  let backtrack_level = learnt
    .literals
    .iter()
    .map(|lit| assignment.level(lit.var()))
    .filter(|&lvl| lvl < level as i64)
    .max()
    .map(|lvl| lvl.max(0) as usize)
    .unwrap_or(0);

  AnalysisOutcome::Learned { clause: learnt, parents, backtrack_level }
}

/// Walks `assignment_history[level]` from most recent to oldest, looking for
/// the latest literal that was forced by unit propagation (has a real
/// antecedent) and whose variable still appears (either polarity) in `learnt`.
fn find_latest_assignment(assignment: &Assignment, level: usize, learnt: &Clause) -> Option<Literal> {
  for &lit in assignment.history_at(level).iter().rev() {
    let var = lit.var();
    if assignment.antecedent(var) == NO_ANTECEDENT {
      continue;
    }
    if learnt.literals.iter().any(|l| l.var() == var) {
      return Some(lit);
    }
  }
  None
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::propagate::propagate;

  fn db(clauses: Vec<Vec<i64>>) -> ClauseDatabase {
    ClauseDatabase::new(clauses.into_iter().map(|c| Clause::from_ints(&c).unwrap()).collect())
  }

  #[test]
  fn first_uip_on_implication_chain() {
    // [-1,2],[-2,3],[1],[-3], N=3: propagating 1 forces 2 then 3, conflicting with [-3] at level 0.
    let d = db(vec![vec![-1, 2], vec![-2, 3], vec![1], vec![-3]]);
    let mut a = Assignment::new(3);
    a.ensure_level(0);
    let conflict = propagate(&d, &mut a, 0).expect("expected a conflict");
    match analyze(&d, &a, conflict, 0) {
      AnalysisOutcome::Unsat { parents } => assert!(!parents.is_empty()),
      AnalysisOutcome::Learned { .. } => panic!("level-0 conflict must resolve to UNSAT"),
    }
  }

  #[test]
  fn direct_contradiction_is_unsat_with_two_parents() {
    let d = db(vec![vec![1], vec![-1]]);
    let mut a = Assignment::new(1);
    a.ensure_level(0);
    let conflict = propagate(&d, &mut a, 0).unwrap();
    match analyze(&d, &a, conflict, 0) {
      AnalysisOutcome::Unsat { parents } => {
        let mut sorted = parents.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1]);
      },
      AnalysisOutcome::Learned { .. } => panic!("expected UNSAT"),
    }
  }
}
