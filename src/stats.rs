//! Statistics (collaborator, §4.L / §6): plain counters threaded through the
//! main loop by the core, formatted to a writer here. Grounded in the
//! teacher's `Stats`/`Record` split, expanded with the counters and the
//! per-level assignment history rendering `solve()`'s `_stats.txt` block
//! produces in the behavioral source.

use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
  pub decisions: u32,
  pub pure_literals: u32,
  pub restarts: u32,
  pub learned_clauses: u32,
  pub propagations: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
  Decision,
  PureLiteral,
  Restart,
  LearnedClause,
  Propagation,
}

impl Stats {
  pub fn record(&mut self, rec: Record) {
    match rec {
      Record::Decision => self.decisions += 1,
      Record::PureLiteral => self.pure_literals += 1,
      Record::Restart => self.restarts += 1,
      Record::LearnedClause => self.learned_clauses += 1,
      Record::Propagation => self.propagations += 1,
    };
  }

  /// Writes the `_stats.txt`-style report: summary counters, then the
  /// per-level assignment history, one line per level.
  pub fn write_report(
    &self,
    mut w: impl Write,
    input_file: &str,
    heuristic: &str,
    elapsed: Duration,
    total_clauses: usize,
    history: &[Vec<i64>],
  ) -> io::Result<()> {
    writeln!(w, "{}", input_file)?;
    writeln!(w, "{}\n", heuristic)?;
    writeln!(w, "Total number of clauses: {}", total_clauses)?;
    writeln!(w, "Number of learned clauses: {}", self.learned_clauses)?;
    writeln!(w, "Number of pure literals: {}", self.pure_literals)?;
    writeln!(w, "Number of picked branching: {}", self.decisions)?;
    writeln!(w, "Number of random restarts: {}", self.restarts)?;
    writeln!(w, "Total time taken (seconds): {:.6}", elapsed.as_secs_f64())?;
    writeln!(w, "\nAssignment History")?;
    for (level, lits) in history.iter().enumerate() {
      let rendered = lits.iter().map(i64::to_string).collect::<Vec<_>>().join(" ");
      writeln!(w, "{} : {}", level, rendered)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn counters_increment() {
    let mut s = Stats::default();
    s.record(Record::Decision);
    s.record(Record::Decision);
    s.record(Record::Restart);
    assert_eq!(s.decisions, 2);
    assert_eq!(s.restarts, 1);
  }

  #[test]
  fn write_report_contains_counts_and_history() {
    let mut s = Stats::default();
    s.record(Record::Decision);
    let mut buf = Vec::new();
    s.write_report(&mut buf, "f.cnf", "ordered", Duration::from_secs(1), 4, &[vec![1, 2], vec![-3]])
      .unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.contains("Number of picked branching: 1"));
    assert!(text.contains("0 : 1 2"));
    assert!(text.contains("1 : -3"));
  }
}
