//! Assignment state (spec component A): the trail, the per-variable value /
//! antecedent / decision-level records, and the per-level assignment history
//! conflict analysis walks backward over.

use crate::literal::Literal;
use hashbrown::HashSet;

/// Sentinel antecedent for decisions, pure literals, and unassigned variables.
pub const NO_ANTECEDENT: i64 = -1;
/// Sentinel decision level for variables that have never been assigned.
pub const UNASSIGNED_LEVEL: i64 = -1;
/// Sentinel decision level for pure literals assigned during preprocessing.
/// Chosen far below any real decision level so `level > backtrack_level` never
/// matches it: pure literals are never undone by `backtrack`.
pub const PURE_LITERAL_LEVEL: i64 = -999;

/// The dense, arena-indexed state of every variable's current assignment.
///
/// Indexing is 1-based to match DIMACS variable numbering directly; index 0 of
/// each vector is unused padding.
#[derive(Debug, Clone)]
pub struct Assignment {
  num_vars: usize,
  /// value[v] in {-1, 0, 1}; 0 means unassigned.
  value: Vec<i8>,
  antecedent: Vec<i64>,
  level: Vec<i64>,
  assigned: HashSet<usize>,
  /// history[level] = literals assigned at that level, decision first.
  history: Vec<Vec<Literal>>,
}

impl Assignment {
  pub fn new(num_vars: usize) -> Self {
    Self {
      num_vars,
      value: vec![0; num_vars + 1],
      antecedent: vec![NO_ANTECEDENT; num_vars + 1],
      level: vec![UNASSIGNED_LEVEL; num_vars + 1],
      assigned: HashSet::new(),
      history: vec![vec![]],
    }
  }

  pub fn num_vars(&self) -> usize { self.num_vars }

  /// Current value of `lit` under the partial assignment, if its variable is assigned.
  #[inline]
  pub fn value_of(&self, lit: Literal) -> Option<bool> {
    match self.value[lit.var()] {
      0 => None,
      v => Some(lit.value_if(v > 0)),
    }
  }

  #[inline]
  pub fn is_assigned(&self, var: usize) -> bool { self.value[var] != 0 }

  pub fn antecedent(&self, var: usize) -> i64 { self.antecedent[var] }

  /// Overwrites `var`'s recorded antecedent in place, without touching its
  /// value or level. Used by the restart/forget mechanism to follow a
  /// learned clause's old-id -> new-id remap after `ClauseDatabase::retain_learned`
  /// compacts the learned tail, so a level-0 variable whose antecedent
  /// survived the forget still points at the clause's new slot (§4.F).
  pub fn set_antecedent(&mut self, var: usize, antecedent: i64) { self.antecedent[var] = antecedent; }

  pub fn level(&self, var: usize) -> i64 { self.level[var] }

  pub fn all_assigned(&self) -> bool { self.assigned.len() == self.num_vars }

  pub fn num_assigned(&self) -> usize { self.assigned.len() }

  /// Ensures `history` has a (possibly empty) slot for `level`.
  pub fn ensure_level(&mut self, level: usize) {
    if self.history.len() <= level {
      self.history.resize(level + 1, vec![]);
    }
  }

  pub fn history_at(&self, level: usize) -> &[Literal] {
    self.history.get(level).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Assigns `lit` true at `level` with the given antecedent (`NO_ANTECEDENT` for
  /// decisions / pure literals). Assignments are never overwritten.
  pub fn assign(&mut self, lit: Literal, antecedent: i64, level: i64) {
    let var = lit.var();
    debug_assert_eq!(self.value[var], 0, "variable {} assigned twice", var);
    self.value[var] = if lit.is_positive() { 1 } else { -1 };
    self.antecedent[var] = antecedent;
    self.level[var] = level;
    self.assigned.insert(var);
    if level >= 0 {
      self.ensure_level(level as usize);
      self.history[level as usize].push(lit);
    }
  }

  /// Clears every variable assigned at a level strictly greater than `to_level`,
  /// and drops history entries beyond it. Pure-literal sentinel assignments are
  /// never cleared since their level is always below any real level.
  pub fn backtrack(&mut self, to_level: usize) {
    for var in 1..=self.num_vars {
      if self.level[var] > to_level as i64 {
        self.value[var] = 0;
        self.antecedent[var] = NO_ANTECEDENT;
        self.level[var] = UNASSIGNED_LEVEL;
        self.assigned.remove(&var);
      }
    }
    if self.history.len() > to_level + 1 {
      self.history.truncate(to_level + 1);
    }
  }

  /// A snapshot of `assignment_history` as raw signed integers, one vector
  /// per decision level, for the statistics report (§4.L/§6).
  pub fn history_snapshot(&self) -> Vec<Vec<i64>> {
    self
      .history
      .iter()
      .map(|lits| lits.iter().map(Literal::raw).collect())
      .collect()
  }

  /// The total assignment as signed literals for variables `1..=num_vars`, once
  /// every variable has a value. Panics if any variable is unassigned.
  pub fn total_assignment(&self) -> Vec<i64> {
    (1..=self.num_vars)
      .map(|v| {
        let val = self.value[v];
        debug_assert_ne!(val, 0, "variable {} is unassigned", v);
        (v as i64) * (val as i64)
      })
      .collect()
  }
}
