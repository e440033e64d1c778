//! Proof rendering (collaborator, §4.K), grounded in
//! `formula_helper/unsat_prover.py`. Pure post-processing over the clause
//! database and parent map the core already produced (§4.H); it does not
//! touch solver state.

use crate::database::ClauseDatabase;
use hashbrown::{HashMap, HashSet};
use std::io::{self, Write};

/// A resolution refutation built from a solver's final clause database.
/// Construct only after `solve()` returns UNSAT with proof generation
/// enabled, so the database's last clause is the empty clause.
pub struct Proof {
  formula: Vec<Vec<i64>>,
  parents: HashMap<usize, Vec<usize>>,
  empty_clause_id: usize,
  /// Size of the formula at construction time (original + learned + the
  /// empty clause, before any synthetic clauses this renderer inserts).
  /// Clauses at or above this index -- i.e. clauses this renderer itself
  /// creates while expanding n-ary resolutions -- are always kept in the
  /// output regardless of whether the backward BFS reached them, mirroring
  /// `renumber_clause`'s `index < self.given_formula_size` guard.
  given_formula_size: usize,
}

impl Proof {
  pub fn from_database(db: &ClauseDatabase) -> Self {
    let empty_clause_id = db.formula.len() - 1;
    debug_assert!(
      db.get(empty_clause_id).is_empty(),
      "proof rendering requires the empty clause as the database's last entry"
    );
    Self {
      formula: db.formula.iter().map(|c| c.literals.iter().map(|l| l.raw()).collect()).collect(),
      parents: db.parents.clone(),
      empty_clause_id,
      given_formula_size: db.formula.len(),
    }
  }

  /// Backward BFS from the empty clause over `parents`, collecting every
  /// clause id that actually participates in the refutation
  /// (`find_all_needed_clauses`).
  fn find_all_needed_clauses(&self) -> HashSet<usize> {
    let mut visited = HashSet::new();
    visited.insert(self.empty_clause_id);
    let mut queue: Vec<usize> =
      self.parents.get(&self.empty_clause_id).cloned().unwrap_or_default();
    while let Some(id) = queue.pop() {
      if !visited.insert(id) {
        continue;
      }
      if let Some(parents) = self.parents.get(&id) {
        queue.extend(parents.iter().copied().filter(|p| !visited.contains(p)));
      }
    }
    visited
  }

  fn resolve(a: &[i64], b: &[i64]) -> Vec<i64> {
    let mut out = a.to_vec();
    for &lit in b {
      if let Some(pos) = out.iter().position(|&l| l == -lit) {
        out.remove(pos);
      } else if !out.contains(&lit) {
        out.push(lit);
      }
    }
    out
  }

  /// Expands any resolution step with more than two parents into a chain of
  /// binary resolutions, inserting synthetic intermediate clauses at the end
  /// of `formula` (`expand_to_two_parents`). Clauses with <= 2 parents, and
  /// original clauses (no entry in `parents`), are left untouched.
  fn expand_to_two_parents(&mut self, needed: &HashSet<usize>) {
    let mut ids: Vec<usize> = needed.iter().copied().collect();
    ids.sort_unstable();
    for id in ids {
      let Some(mut parents) = self.parents.get(&id).cloned() else { continue };
      if parents.len() <= 2 {
        continue;
      }
      let last = parents.pop().unwrap();
      let mut acc_idx = parents[0];
      let mut acc_clause = self.formula[acc_idx].clone();
      for &next_idx in &parents[1..] {
        acc_clause = Self::resolve(&acc_clause, &self.formula[next_idx]);
        self.formula.push(acc_clause.clone());
        let new_id = self.formula.len() - 1;
        self.parents.insert(new_id, vec![acc_idx, next_idx]);
        acc_idx = new_id;
      }
      self.parents.insert(id, vec![acc_idx, last]);
    }
  }

  /// Drops clauses outside the refutation, renumbers the survivors 1-based,
  /// and returns the renumbered formula plus parent map; the empty clause
  /// itself is excluded from the formula and its parents are keyed under
  /// `-1` (`renumber_clause`).
  fn renumber(&self, needed: &HashSet<usize>) -> (Vec<Vec<i64>>, HashMap<i64, Vec<i64>>) {
    let mut id_map: HashMap<usize, i64> = HashMap::new();
    let mut new_formula = vec![];
    for (id, clause) in self.formula.iter().enumerate() {
      if id == self.empty_clause_id {
        continue;
      }
      if !needed.contains(&id) && id < self.given_formula_size {
        continue;
      }
      new_formula.push(clause.clone());
      id_map.insert(id, new_formula.len() as i64);
    }

    let mut new_parents = HashMap::new();
    for (&id, parents) in &self.parents {
      if id == self.empty_clause_id {
        continue;
      }
      if let Some(&new_id) = id_map.get(&id) {
        let mut mapped: Vec<i64> = parents.iter().filter_map(|p| id_map.get(p).copied()).collect();
        mapped.sort_unstable();
        new_parents.insert(new_id, mapped);
      }
    }

    let empty_parents = self.parents.get(&self.empty_clause_id).cloned().unwrap_or_default();
    let mut mapped_empty: Vec<i64> = empty_parents.iter().filter_map(|p| id_map.get(p).copied()).collect();
    mapped_empty.sort_unstable();
    new_parents.insert(-1, mapped_empty);

    (new_formula, new_parents)
  }

  /// Renders the refutation to `w`: the clause count, each surviving clause,
  /// then each binary parent pair followed by the id it resolves to
  /// (`write_proof`). The empty clause's own parents are written under id
  /// `-1`.
  ///
  /// Diverges from `unsat_prover.py` in one respect: the needed-clause set
  /// is recomputed by a second BFS after `expand_to_two_parents` runs, so
  /// every synthetic intermediate clause gets its own parent line. The
  /// original reuses the pre-expansion needed set, which silently drops the
  /// parent line for synthetic clauses -- inconsistent with §4.K's "writes
  /// them out together with the binary parent pairs".
  pub fn write(&mut self, mut w: impl Write) -> io::Result<()> {
    let needed = self.find_all_needed_clauses();
    self.expand_to_two_parents(&needed);
    let needed = self.find_all_needed_clauses();
    let (new_formula, new_parents) = self.renumber(&needed);

    writeln!(w, "v {}", new_formula.len())?;
    for clause in &new_formula {
      let rendered = clause.iter().map(i64::to_string).collect::<Vec<_>>().join(" ");
      writeln!(w, "{}", rendered)?;
    }
    let mut entries: Vec<(&i64, &Vec<i64>)> = new_parents.iter().collect();
    entries.sort_by_key(|(id, _)| **id);
    for (id, parents) in entries {
      let rendered = parents.iter().map(i64::to_string).collect::<Vec<_>>().join(" ");
      writeln!(w, "{} {}", rendered, id)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::clause::Clause;

  fn db_with_empty_clause(original: Vec<Vec<i64>>, parents_of_empty: Vec<usize>) -> ClauseDatabase {
    let mut db =
      ClauseDatabase::new(original.into_iter().map(|c| Clause::from_ints(&c).unwrap()).collect());
    db.add_empty_clause(parents_of_empty);
    db
  }

  #[test]
  fn direct_contradiction_proof_has_two_original_parents() {
    // [[1], [-1]]: the empty clause's parents are the two unit clauses, ids 0 and 1.
    let db = db_with_empty_clause(vec![vec![1], vec![-1]], vec![0, 1]);
    let mut proof = Proof::from_database(&db);
    let mut out = Vec::new();
    proof.write(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("v 2"));
    assert!(text.contains("1 2 -1"), "expected the empty clause's mapped parents, got: {}", text);
  }

  #[test]
  fn expands_ternary_resolution_to_binary_chain() {
    let mut db = ClauseDatabase::new(
      vec![vec![1, 2], vec![-1, 3], vec![-2, -3]]
        .into_iter()
        .map(|c| Clause::from_ints(&c).unwrap())
        .collect(),
    );
    // A learned clause resolved from all three originals at once (3 parents).
    db.add_learned(Clause::from_ints(&[1]).unwrap(), vec![0, 1, 2], true);
    db.add_empty_clause(vec![3]);
    let mut proof = Proof::from_database(&db);
    let needed = proof.find_all_needed_clauses();
    assert!(needed.contains(&3));
    proof.expand_to_two_parents(&needed);
    // clause 3 now has exactly two parents after expansion.
    assert_eq!(proof.parents.get(&3).map(Vec::len), Some(2));
  }
}
