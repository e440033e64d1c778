//! Unit propagation (spec component C, §4.C): a naive scan-based fixpoint.
//! No watched literals per the spec's explicit non-goal — every clause is
//! rescanned after each single assignment until a conflict is found or the
//! formula has no more unit clauses.

use crate::assignment::Assignment;
use crate::clause::ClauseStatus;
use crate::database::ClauseDatabase;
use crate::literal::Literal;
use hashbrown::HashSet;

/// Runs unit propagation at `level`, assigning every literal forced by a unit
/// clause (in discovery order) until a conflict is found or no clause is unit.
/// Returns the conflicting clause id, or `None` if propagation reached a fixpoint.
pub fn propagate(db: &ClauseDatabase, assignment: &mut Assignment, level: usize) -> Option<usize> {
  let mut pending: Vec<(Literal, usize)> = vec![];
  let mut pending_lits: HashSet<Literal> = HashSet::new();

  for (id, clause) in db.formula.iter().enumerate() {
    if let ClauseStatus::Unit(lit) = clause.status(assignment) {
      if pending_lits.insert(lit) {
        pending.push((lit, id));
      }
    }
  }

  while let Some((lit, antecedent)) = pending.pop() {
    pending_lits.remove(&lit);
    assignment.assign(lit, antecedent as i64, level as i64);
    log::trace!("propagated {} from clause {}", lit, antecedent);

    for (id, clause) in db.formula.iter().enumerate() {
      match clause.status(assignment) {
        ClauseStatus::Sat | ClauseStatus::Undetermined => continue,
        ClauseStatus::Unit(new_lit) => {
          if pending_lits.insert(new_lit) {
            pending.push((new_lit, id));
          }
        },
        ClauseStatus::Unsat => return Some(id),
      }
    }
  }
  None
}
