//! Clause database (spec component B): the growable clause arena, the
//! original/learned dedup sets, and the proof-accounting parent map (§3, §4.H).

use crate::clause::Clause;
use crate::literal::Literal;
use hashbrown::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct ClauseDatabase {
  /// Original clauses occupy indices `0..num_original`; learned clauses follow.
  /// A clause id (used by `antecedent` and by `parents`) is an index into this vector.
  pub formula: Vec<Clause>,
  num_original: usize,
  original_set: HashSet<Vec<Literal>>,
  learned_set: HashSet<Vec<Literal>>,
  /// clause id -> ordered parent clause ids whose resolution produced it.
  /// Populated only when proof generation is enabled; original clauses have no entry.
  pub parents: HashMap<usize, Vec<usize>>,
  /// Restart threshold on the number of learned clauses (§4.F); grows by 1.5x per restart.
  pub learned_limit: f64,
}

impl ClauseDatabase {
  pub fn new(original: Vec<Clause>) -> Self {
    let original_set: HashSet<Vec<Literal>> = original.iter().map(Clause::canonical).collect();
    let num_original = original.len();
    let learned_limit = (num_original as f64 / 5.0).floor();
    Self {
      formula: original,
      num_original,
      original_set,
      learned_set: HashSet::new(),
      parents: HashMap::new(),
      learned_limit,
    }
  }

  pub fn num_original(&self) -> usize { self.num_original }

  pub fn num_learned(&self) -> usize { self.formula.len() - self.num_original }

  pub fn get(&self, id: usize) -> &Clause { &self.formula[id] }

  pub fn learned_ids(&self) -> std::ops::Range<usize> { self.num_original..self.formula.len() }

  /// Whether a clause's canonical form is already present among originals or learned.
  pub fn contains_canonical(&self, canonical: &[Literal]) -> bool {
    self.original_set.contains(canonical) || self.learned_set.contains(canonical)
  }

  /// Adds `clause` as a learned clause unless an equivalent clause (modulo
  /// literal order) is already present (invariant 4/6). Returns its id if added.
  pub fn add_learned(
    &mut self,
    clause: Clause,
    parents: Vec<usize>,
    record_proof: bool,
  ) -> Option<usize> {
    let canonical = clause.canonical();
    if self.contains_canonical(&canonical) {
      return None;
    }
    self.learned_set.insert(canonical);
    let id = self.formula.len();
    self.formula.push(clause);
    if record_proof {
      self.parents.insert(id, parents);
    }
    Some(id)
  }

  /// Appends the empty clause `[0]` marking UNSAT, recording its parents (§4.D, §4.H).
  pub fn add_empty_clause(&mut self, parents: Vec<usize>) -> usize {
    let id = self.formula.len();
    self.formula.push(Clause::empty());
    self.parents.insert(id, parents);
    id
  }

  /// Rebuilds the learned-clause tail, keeping only clauses for which `keep`
  /// (given a learned clause's id and the clause itself) returns true, and
  /// returns a map from old clause id to new clause id for every retained
  /// learned clause (original clause ids never change). Used by the
  /// restart/forget mechanism (§4.F); proof generation must be disabled
  /// whenever this is called, so `parents` is left untouched.
  pub fn retain_learned(&mut self, keep: impl Fn(usize, &Clause) -> bool) -> HashMap<usize, usize> {
    let mut id_map = HashMap::new();
    let mut new_formula = self.formula[..self.num_original].to_vec();
    let mut new_learned_set = HashSet::new();
    for old_id in self.num_original..self.formula.len() {
      let clause = &self.formula[old_id];
      if !keep(old_id, clause) {
        continue;
      }
      let new_id = new_formula.len();
      id_map.insert(old_id, new_id);
      new_learned_set.insert(clause.canonical());
      new_formula.push(clause.clone());
    }
    self.formula = new_formula;
    self.learned_set = new_learned_set;
    id_map
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::literal::Literal;

  fn clause(ints: &[i64]) -> Clause { Clause::from_ints(ints).unwrap() }

  #[test]
  fn dedup_rejects_repeat_clause() {
    let mut db = ClauseDatabase::new(vec![clause(&[1, 2])]);
    assert_eq!(db.add_learned(clause(&[2, 1]), vec![], false), None);
    assert_eq!(db.add_learned(clause(&[1, 3]), vec![], false), Some(1));
  }

  #[test]
  fn retain_learned_reindexes() {
    let mut db = ClauseDatabase::new(vec![clause(&[1, 2])]);
    db.add_learned(clause(&[1, 3]), vec![], false);
    db.add_learned(clause(&[2, 3]), vec![], false);
    db.add_learned(clause(&[-1, -2]), vec![], false);
    let map = db.retain_learned(|_id, c| c.literals.contains(&Literal::from(3i32)));
    assert_eq!(db.num_learned(), 2);
    assert_eq!(map.get(&1), Some(&1));
    assert_eq!(map.get(&2), Some(&2));
    assert_eq!(map.get(&3), None);
  }
}
