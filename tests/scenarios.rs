//! Integration coverage of the concrete scenarios and laws in §8: full
//! `Solver::new`/`solve` runs over small formulas, across every heuristic,
//! plus the proof-mode and solution-checker round trips.

use cdcl_sat::checker::check_solution;
use cdcl_sat::clause::Clause;
use cdcl_sat::config::Config;
use cdcl_sat::heuristic::HeuristicKind;
use cdcl_sat::proof::Proof;
use cdcl_sat::solver::{SolveResult, Solver};

const ALL_HEURISTICS: [HeuristicKind; 4] =
  [HeuristicKind::Ordered, HeuristicKind::Random, HeuristicKind::TwoClause, HeuristicKind::Vsids];

fn formula(clauses: &[&[i64]]) -> Vec<Clause> {
  clauses.iter().map(|c| Clause::from_ints(c).unwrap()).collect()
}

fn solve_with(clauses: &[&[i64]], num_vars: usize, heuristic: HeuristicKind) -> SolveResult {
  let config = Config { heuristic, seed: 13, ..Config::default() };
  Solver::new(formula(clauses), num_vars, config).unwrap().solve()
}

#[test]
fn scenario_single_unit_is_sat_with_assignment_one() {
  for h in ALL_HEURISTICS {
    assert_eq!(solve_with(&[&[1]], 1, h), SolveResult::Sat(vec![1]), "heuristic {:?}", h);
  }
}

#[test]
fn scenario_direct_contradiction_is_unsat() {
  for h in ALL_HEURISTICS {
    assert_eq!(solve_with(&[&[1], &[-1]], 1, h), SolveResult::Unsat, "heuristic {:?}", h);
  }
}

#[test]
fn scenario_two_variable_implication_chain_is_unsat() {
  for h in ALL_HEURISTICS {
    let clauses: &[&[i64]] = &[&[-1, 2], &[-2, 3], &[1], &[-3]];
    assert_eq!(solve_with(clauses, 3, h), SolveResult::Unsat, "heuristic {:?}", h);
  }
}

#[test]
fn scenario_pigeonhole_two_in_one_is_unsat_regardless_of_heuristic() {
  let clauses: &[&[i64]] = &[&[1, 2], &[-1, -2], &[1, -2], &[-1, 2]];
  for h in ALL_HEURISTICS {
    assert_eq!(solve_with(clauses, 2, h), SolveResult::Unsat, "heuristic {:?}", h);
  }
}

#[test]
fn scenario_satisfiable_3sat_round_trips_through_the_checker() {
  let clauses: &[&[i64]] = &[&[1, 2, 3], &[-1, 2, 3], &[1, -2, 3], &[1, 2, -3]];
  for h in ALL_HEURISTICS {
    match solve_with(clauses, 3, h) {
      SolveResult::Sat(assignment) => {
        assert!(check_solution(&formula(clauses), &assignment), "heuristic {:?}", h);
      },
      SolveResult::Unsat => panic!("heuristic {:?}: expected SAT", h),
    }
  }
}

#[test]
fn scenario_pure_literal_only_formula_is_sat_via_elimination() {
  let config = Config { eliminate_pure_literal: true, ..Config::default() };
  let clauses: &[&[i64]] = &[&[1, 2], &[1, 3]];
  let mut solver = Solver::new(formula(clauses), 3, config).unwrap();
  assert_eq!(solver.solve(), SolveResult::Sat(vec![1, 2, 3]));
}

#[test]
fn proof_mode_direct_contradiction_emits_empty_clause_with_unit_clause_parents() {
  let config = Config { generate_proof: true, ..Config::default() };
  let clauses: &[&[i64]] = &[&[1], &[-1]];
  let mut solver = Solver::new(formula(clauses), 1, config).unwrap();
  assert_eq!(solver.solve(), SolveResult::Unsat);

  let db = solver.database();
  let empty_id = db.formula.len() - 1;
  assert!(db.get(empty_id).is_empty());
  let mut parents = db.parents.get(&empty_id).unwrap().clone();
  parents.sort_unstable();
  assert_eq!(parents, vec![0, 1]);

  let mut proof = Proof::from_database(db);
  let mut rendered = Vec::new();
  proof.write(&mut rendered).unwrap();
  let text = String::from_utf8(rendered).unwrap();
  assert!(text.starts_with("v 2\n"));
}

#[test]
fn restart_enabled_still_reaches_the_correct_verdict() {
  let config = Config { random_restart: true, seed: 3, ..Config::default() };
  let clauses: &[&[i64]] = &[&[1, 2], &[-1, -2], &[1, -2], &[-1, 2]];
  let mut solver = Solver::new(formula(clauses), 2, config).unwrap();
  assert_eq!(solver.solve(), SolveResult::Unsat);
}
