//! Restart & forget (spec component F, §4.F): periodically discards the
//! lowest-activity half of the learned clauses and backtracks to level 0,
//! keeping the learned-clause arena from growing without bound.

use crate::assignment::{Assignment, NO_ANTECEDENT};
use crate::database::ClauseDatabase;
use crate::heuristic::Heuristic;
use hashbrown::HashSet;

/// Whether a restart should fire this iteration: learned count has exceeded
/// the current `learned_limit` (§4.F trigger).
pub fn should_restart(db: &ClauseDatabase) -> bool { (db.num_learned() as f64) > db.learned_limit }

/// Performs one restart+forget cycle: grows `learned_limit`, discards the
/// lower-scoring half of learned clauses by mean literal activity, and
/// backtracks to level 0. Proof generation must be disabled by the caller
/// before this is ever invoked (§4.F, §7 `restart_with_proof`).
pub fn restart_and_forget(db: &mut ClauseDatabase, assignment: &mut Assignment, heuristic: &Heuristic) {
  db.learned_limit *= 1.5;

  let num_learned = db.num_learned();
  if num_learned == 0 {
    assignment.backtrack(0);
    return;
  }

  let mut scored: Vec<(usize, f64)> = db
    .learned_ids()
    .map(|id| {
      let clause = db.get(id);
      let mean_activity = clause.literals.iter().map(|&lit| heuristic.activity_of(lit)).sum::<f64>()
        / clause.len() as f64;
      (id, mean_activity)
    })
    .collect();
  // Stable sort on the (id, score) pairs, highest activity first; ties keep
  // the lower original id first, matching the scan order the naive design
  // note favors elsewhere in this crate.
  scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());

  let keep_count = (num_learned + 1) / 2; // ceil(k / 2)
  let keep_ids: hashbrown::HashSet<usize> = scored.into_iter().take(keep_count).map(|(id, _)| id).collect();
  let num_original = db.num_original();

  for var in 1..=assignment.num_vars() {
    if assignment.level(var) == 0 {
      let ant = assignment.antecedent(var);
      debug_assert!(
        ant == NO_ANTECEDENT || (ant as usize) < num_original || keep_ids.contains(&(ant as usize)),
        "restart would discard clause {} serving as the antecedent of variable {}",
        ant,
        var
      );
    }
  }

  let id_map = db.retain_learned(|id, _clause| keep_ids.contains(&id));

  // retain_learned compacts the surviving learned clauses onto new ids;
  // original clause ids never move. A level-0 variable can have a learned
  // clause as its antecedent (propagation at level 0 may use a previously
  // learned unit clause), and level-0 assignments are never undone by the
  // backtrack below, so its antecedent must be rewritten to the new id or
  // subsequent conflict analysis resolves against the wrong clause (§4.F).
  for var in 1..=assignment.num_vars() {
    if assignment.level(var) != 0 {
      continue;
    }
    let ant = assignment.antecedent(var);
    if ant >= 0 && (ant as usize) >= num_original {
      let new_id = id_map.get(&(ant as usize)).expect("kept antecedent must be in the id map");
      assignment.set_antecedent(var, *new_id as i64);
    }
  }

  assignment.backtrack(0);
}
