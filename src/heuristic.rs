//! Branching heuristics (spec component E, §4.E): a tagged variant set rather
//! than dynamic dispatch, matching the design note that a decision is made
//! once per level and doesn't warrant an indirect call.

use crate::assignment::Assignment;
use crate::database::ClauseDatabase;
use crate::literal::Literal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Branching rule selected by `Config::heuristic`; `ordered` is the default
/// (simplest, dependency-free selection rule). `clap::ValueEnum` is derived
/// here, not only in the CLI binary, since the rule is also what the
/// statistics report names per run (§4.L).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HeuristicKind {
  Ordered,
  Random,
  TwoClause,
  Vsids,
}

impl Default for HeuristicKind {
  fn default() -> Self { HeuristicKind::Ordered }
}

impl fmt::Display for HeuristicKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      HeuristicKind::Ordered => "ordered",
      HeuristicKind::Random => "random",
      HeuristicKind::TwoClause => "two_clause",
      HeuristicKind::Vsids => "vsids",
    };
    write!(f, "{}", s)
  }
}

/// Branching state: per-variable two-clause counts, per-literal VSIDS-like
/// activity, and the previously chosen decision literal (§3).
#[derive(Debug)]
pub struct Heuristic {
  kind: HeuristicKind,
  rng: StdRng,
  num_vars: usize,
  two_clause_count: Vec<u32>,
  /// activity[0][v] is the activity of the positive literal for v; activity[1][v] negative.
  activity: [Vec<f64>; 2],
  prev_decision: Option<Literal>,
}

impl Heuristic {
  pub fn new(kind: HeuristicKind, num_vars: usize, seed: u64) -> Self {
    let mut h = Self {
      kind,
      rng: StdRng::seed_from_u64(seed),
      num_vars,
      two_clause_count: vec![0; num_vars + 1],
      activity: [vec![0.0; num_vars + 1], vec![0.0; num_vars + 1]],
      prev_decision: None,
    };
    h.pre_initialize_from(None);
    h
  }

  /// Pre-initialization (§4.E): VSIDS activity seeded from every literal
  /// occurrence in the original formula; two-clause counts from binary clauses.
  pub fn pre_initialize(&mut self, db: &ClauseDatabase) { self.pre_initialize_from(Some(db)); }

  fn pre_initialize_from(&mut self, db: Option<&ClauseDatabase>) {
    let Some(db) = db else { return };
    for clause in &db.formula {
      if self.kind == HeuristicKind::Vsids {
        for lit in &clause.literals {
          self.bump_additive(*lit);
        }
      }
      if self.kind == HeuristicKind::TwoClause && clause.literals.len() == 2 {
        for lit in &clause.literals {
          self.two_clause_count[lit.var()] += 1;
        }
      }
    }
  }

  fn slot(&mut self, lit: Literal) -> &mut f64 {
    let polarity = if lit.is_positive() { 0 } else { 1 };
    &mut self.activity[polarity][lit.var()]
  }

  /// The current VSIDS-like activity of a literal, used by the restart/forget
  /// mechanism to score learned clauses (§4.F).
  pub fn activity_of(&self, lit: Literal) -> f64 {
    let polarity = if lit.is_positive() { 0 } else { 1 };
    self.activity[polarity][lit.var()]
  }

  fn bump_additive(&mut self, lit: Literal) { *self.slot(lit) += 1.0; }

  /// Additive bump (+1) plus multiplicative boost `*= 1 + r`, `r ~ Uniform(0, 1)`,
  /// applied whenever a literal participates in a conflict or is chosen as a
  /// decision (§4.E). No global decay sweep: growth of recent participants
  /// implicitly decays the rest.
  pub fn bump_and_boost(&mut self, lit: Literal) {
    self.bump_additive(lit);
    let r: f64 = self.rng.gen_range(0.000_001..1.0);
    *self.slot(lit) *= 1.0 + r;
  }

  /// Updates the two-clause count when a freshly learned binary clause is added.
  pub fn note_learned_binary(&mut self, lits: &[Literal]) {
    for lit in lits {
      self.two_clause_count[lit.var()] += 1;
    }
  }

  pub fn record_decision(&mut self, lit: Literal) { self.prev_decision = Some(lit); }

  fn unassigned_vars(&self, assignment: &Assignment) -> Vec<usize> {
    (1..=self.num_vars).filter(|&v| !assignment.is_assigned(v)).collect()
  }

  /// Selects the next decision literal (§4.E). Panics if every variable is
  /// already assigned -- callers must check `Assignment::all_assigned` first.
  pub fn pick(&mut self, assignment: &Assignment) -> Literal {
    match self.kind {
      HeuristicKind::Ordered => self.pick_ordered(assignment),
      HeuristicKind::Random => self.pick_random(assignment),
      HeuristicKind::TwoClause => self.pick_two_clause(assignment),
      HeuristicKind::Vsids => self.pick_vsids(assignment),
    }
  }

  fn random_sign(&mut self, var: usize) -> Literal {
    let raw = var as i64;
    if self.rng.gen_bool(0.5) { Literal::new(raw) } else { Literal::new(-raw) }
  }

  fn pick_ordered(&mut self, assignment: &Assignment) -> Literal {
    let var = (1..=self.num_vars)
      .find(|&v| !assignment.is_assigned(v))
      .expect("pick called with no unassigned variables");
    self.random_sign(var)
  }

  fn pick_random(&mut self, assignment: &Assignment) -> Literal {
    let unassigned = self.unassigned_vars(assignment);
    let idx = self.rng.gen_range(0..unassigned.len());
    self.random_sign(unassigned[idx])
  }

  fn pick_two_clause(&mut self, assignment: &Assignment) -> Literal {
    let unassigned = self.unassigned_vars(assignment);
    let best = unassigned
      .iter()
      .copied()
      .max_by_key(|&v| self.two_clause_count[v]);
    match best {
      Some(var) if self.two_clause_count[var] > 0 => self.random_sign(var),
      _ => self.pick_random(assignment),
    }
  }

  fn pick_vsids(&mut self, assignment: &Assignment) -> Literal {
    let unassigned = self.unassigned_vars(assignment);
    let mut candidates: Vec<Literal> = Vec::with_capacity(unassigned.len() * 2);
    for var in &unassigned {
      candidates.push(Literal::new(*var as i64));
      candidates.push(Literal::new(-(*var as i64)));
    }
    candidates.sort_by(|a, b| {
      self
        .activity_of(*b)
        .partial_cmp(&self.activity_of(*a))
        .unwrap()
    });
    for lit in candidates {
      if Some(lit) != self.prev_decision {
        return lit;
      }
    }
    self.pick_random(assignment)
  }
}
