//! The main loop (spec component G, §4.G): sequences pure-literal
//! preprocessing, unit propagation, conflict analysis, backtracking, restart
//! and forget, and branching heuristics to a satisfiability verdict.
//! Grounded in `cdcl_solver.py`'s `CDCLSolver.__init__`/`cdcl`/`solve` for the
//! overall sequencing and in the teacher's `solver.rs::solve` for the Rust
//! idiom of a driving loop threading a `Stats` struct through.

use crate::analyze::{self, AnalysisOutcome};
use crate::assignment::{Assignment, NO_ANTECEDENT, PURE_LITERAL_LEVEL};
use crate::clause::Clause;
use crate::config::Config;
use crate::database::ClauseDatabase;
use crate::dimacs;
use crate::error::Result;
use crate::heuristic::{Heuristic, HeuristicKind};
use crate::literal::Literal;
use crate::propagate;
use crate::restart;
use crate::stats::{Record, Stats};
use hashbrown::HashSet;
use std::path::Path;

/// The outcome of `Solver::solve` (§6 Output): either a total satisfying
/// assignment as signed literals for variables `1..=N`, or UNSAT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveResult {
  Sat(Vec<i64>),
  Unsat,
}

impl SolveResult {
  pub fn is_sat(&self) -> bool { matches!(self, SolveResult::Sat(_)) }
}

#[derive(Debug, Clone)]
pub struct Solver {
  config: Config,
  db: ClauseDatabase,
  assignment: Assignment,
  heuristic: Heuristic,
  level: usize,
  pub stats: Stats,
}

impl Solver {
  /// Builds a solver over `formula` (clauses already validated by the
  /// collaborator that produced them, e.g. the DIMACS parser). Rejects an
  /// invalid configuration (§7) before doing any other work.
  pub fn new(formula: Vec<Clause>, num_vars: usize, config: Config) -> Result<Self> {
    config.validate()?;
    let db = ClauseDatabase::new(formula);
    let mut heuristic = Heuristic::new(config.heuristic, num_vars, config.seed);
    heuristic.pre_initialize(&db);
    Ok(Self { config, db, assignment: Assignment::new(num_vars), heuristic, level: 0, stats: Stats::default() })
  }

  /// Builds a solver by reading a DIMACS CNF file (§4.I collaborator).
  pub fn from_dimacs<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
    let (formula, num_vars) = dimacs::from_dimacs(path)?;
    Self::new(formula, num_vars, config)
  }

  pub fn database(&self) -> &ClauseDatabase { &self.db }

  pub fn config(&self) -> &Config { &self.config }

  /// The per-level assignment history, for the statistics report (§4.L).
  pub fn history_snapshot(&self) -> Vec<Vec<i64>> { self.assignment.history_snapshot() }

  /// Runs the main loop (§4.G) to a satisfiability verdict.
  pub fn solve(&mut self) -> SolveResult {
    self.assignment.ensure_level(0);

    if self.config.eliminate_pure_literal {
      self.eliminate_pure_literals();
    }

    loop {
      if self.config.random_restart && restart::should_restart(&self.db) {
        log::info!(
          "restart: {} learned clauses exceeds limit {}",
          self.db.num_learned(),
          self.db.learned_limit
        );
        restart::restart_and_forget(&mut self.db, &mut self.assignment, &self.heuristic);
        self.stats.record(Record::Restart);
        self.level = 0;
      }

      let before_assigned = self.assignment.num_assigned();
      let conflict = propagate::propagate(&self.db, &mut self.assignment, self.level);
      self.stats.propagations += (self.assignment.num_assigned() - before_assigned) as u32;

      match conflict {
        Some(conflict_id) => {
          match analyze::analyze(&self.db, &self.assignment, conflict_id, self.level) {
            AnalysisOutcome::Unsat { parents } => {
              log::info!("UNSAT");
              if self.config.generate_proof {
                self.db.add_empty_clause(parents);
              }
              return SolveResult::Unsat;
            },
            AnalysisOutcome::Learned { clause, parents, backtrack_level } => {
              log::debug!("learned clause {} at level {}, backtracking to {}", clause, self.level, backtrack_level);
              self.learn_clause(clause, parents);
              self.assignment.backtrack(backtrack_level);
              self.level = backtrack_level;
            },
          }
        },
        None if self.assignment.all_assigned() => {
          log::info!("SAT");
          return SolveResult::Sat(self.assignment.total_assignment());
        },
        None => {
          self.level += 1;
          self.assignment.ensure_level(self.level);
          let lit = self.heuristic.pick(&self.assignment);
          self.heuristic.record_decision(lit);
          self.heuristic.bump_and_boost(lit);
          self.stats.record(Record::Decision);
          log::debug!("decision {} at level {}", lit, self.level);
          self.assignment.assign(lit, NO_ANTECEDENT, self.level as i64);
        },
      }
    }
  }

  /// Canonicalizes and adds a learned clause, applying the two-clause and
  /// VSIDS activity updates the heuristic needs on every addition (§4.D).
  fn learn_clause(&mut self, clause: Clause, parents: Vec<usize>) {
    let is_binary = clause.len() == 2;
    let literals = clause.literals.clone();
    if self.db.add_learned(clause, parents, self.config.generate_proof).is_some() {
      self.stats.record(Record::LearnedClause);
      if self.config.heuristic == HeuristicKind::TwoClause && is_binary {
        self.heuristic.note_learned_binary(&literals);
      }
      for lit in &literals {
        self.heuristic.bump_and_boost(*lit);
      }
    }
  }

  /// Pure-literal elimination (spec component H, §4.G step 1): assigns every
  /// literal whose negation never occurs in the original formula, at the
  /// permanent sentinel level, with a sentinel antecedent. Grounded in
  /// `pure_literal_elimination`.
  fn eliminate_pure_literals(&mut self) {
    let mut present: HashSet<Literal> = HashSet::new();
    for clause in &self.db.formula {
      present.extend(clause.literals.iter().copied());
    }
    let pure: Vec<Literal> = present.iter().copied().filter(|lit| !present.contains(&!*lit)).collect();
    for lit in pure {
      self.assignment.assign(lit, NO_ANTECEDENT, PURE_LITERAL_LEVEL);
      self.stats.record(Record::PureLiteral);
      log::debug!("pure literal {}", lit);
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::heuristic::HeuristicKind;

  fn formula(clauses: Vec<Vec<i64>>) -> Vec<Clause> {
    clauses.into_iter().map(|c| Clause::from_ints(&c).unwrap()).collect()
  }

  fn solve(clauses: Vec<Vec<i64>>, num_vars: usize, config: Config) -> SolveResult {
    Solver::new(formula(clauses), num_vars, config).unwrap().solve()
  }

  #[test]
  fn single_unit_is_sat() {
    let result = solve(vec![vec![1]], 1, Config::default());
    assert_eq!(result, SolveResult::Sat(vec![1]));
  }

  #[test]
  fn direct_contradiction_is_unsat() {
    let result = solve(vec![vec![1], vec![-1]], 1, Config::default());
    assert_eq!(result, SolveResult::Unsat);
  }

  #[test]
  fn implication_chain_is_unsat() {
    let result = solve(vec![vec![-1, 2], vec![-2, 3], vec![1], vec![-3]], 3, Config::default());
    assert_eq!(result, SolveResult::Unsat);
  }

  #[test]
  fn pigeonhole_two_in_one_is_unsat_for_every_heuristic() {
    let clauses = vec![vec![1, 2], vec![-1, -2], vec![1, -2], vec![-1, 2]];
    for heuristic in [HeuristicKind::Ordered, HeuristicKind::Random, HeuristicKind::TwoClause, HeuristicKind::Vsids]
    {
      let config = Config { heuristic, seed: 7, ..Config::default() };
      assert_eq!(solve(clauses.clone(), 2, config), SolveResult::Unsat, "heuristic {:?}", heuristic);
    }
  }

  #[test]
  fn satisfiable_3sat_produces_a_satisfying_assignment() {
    let clauses = vec![vec![1, 2, 3], vec![-1, 2, 3], vec![1, -2, 3], vec![1, 2, -3]];
    let result = solve(clauses.clone(), 3, Config::default());
    match result {
      SolveResult::Sat(assignment) => {
        let original = formula(clauses);
        assert!(crate::checker::check_solution(&original, &assignment));
      },
      SolveResult::Unsat => panic!("expected SAT"),
    }
  }

  #[test]
  fn pure_literal_only_formula_is_satisfied_by_elimination() {
    let config = Config { eliminate_pure_literal: true, ..Config::default() };
    let mut solver = Solver::new(formula(vec![vec![1, 2], vec![1, 3]]), 3, config).unwrap();
    let result = solver.solve();
    assert_eq!(result, SolveResult::Sat(vec![1, 2, 3]));
    assert_eq!(solver.stats.pure_literals, 3);
  }

  #[test]
  fn proof_mode_records_two_parents_for_direct_contradiction() {
    let config = Config { generate_proof: true, ..Config::default() };
    let mut solver = Solver::new(formula(vec![vec![1], vec![-1]]), 1, config).unwrap();
    assert_eq!(solver.solve(), SolveResult::Unsat);
    let empty_id = solver.database().formula.len() - 1;
    assert!(solver.database().get(empty_id).is_empty());
    let mut parents = solver.database().parents.get(&empty_id).unwrap().clone();
    parents.sort_unstable();
    assert_eq!(parents, vec![0, 1]);
  }

  #[test]
  fn restart_and_proof_together_is_rejected() {
    let config = Config { random_restart: true, generate_proof: true, ..Config::default() };
    assert!(Solver::new(formula(vec![vec![1]]), 1, config).is_err());
  }
}
