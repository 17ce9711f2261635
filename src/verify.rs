// Copyright (C) 2026 Michael Wilson <mike@mdwn.dev>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

use std::collections::BTreeMap;
use std::fmt::Write;

use midly::num::u7;

use crate::config::SamplerConfig;
use crate::notes::{corpus_programs, NoteTable};

/// Severity level for a verification issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A single verification issue found during checking.
#[derive(Debug, Clone)]
pub struct Issue {
    pub severity: Severity,
    pub category: &'static str,
    /// The index of the table the issue was found in, if it belongs to one.
    pub table: Option<usize>,
    pub program: Option<u7>,
    pub message: String,
}

/// Result of verifying a corpus.
#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub issues: Vec<Issue>,
}

impl VerificationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: VerificationReport) {
        self.issues.extend(other.issues);
    }
}

/// Checks every program in a single table. A program gets a warning when drawing it from this
/// table can never fill its channel.
pub fn check_table(index: usize, table: &NoteTable, config: &SamplerConfig) -> Vec<Issue> {
    let mut issues = Vec::new();
    for program in table.programs() {
        let notes = table.for_program(program);
        if notes.len() < config.seq_len() {
            issues.push(Issue {
                severity: Severity::Warning,
                category: "too-few-notes",
                table: Some(index),
                program: Some(program),
                message: format!(
                    "program {} has {} note(s), fewer than the sequence length of {}",
                    program.as_int(),
                    notes.len(),
                    config.seq_len()
                ),
            });
            continue;
        }

        if let (Some(start), Some(end)) = (notes.min_start(), notes.max_end()) {
            if end - start < config.bar_duration() {
                issues.push(Issue {
                    severity: Severity::Warning,
                    category: "short-span",
                    table: Some(index),
                    program: Some(program),
                    message: format!(
                        "program {} spans {:.3}, shorter than one bar ({:.3})",
                        program.as_int(),
                        end - start,
                        config.bar_duration()
                    ),
                });
            }
        }
    }
    issues
}

/// Checks all tables in a corpus.
pub fn check_corpus(tables: &[NoteTable], config: &SamplerConfig) -> VerificationReport {
    let mut report = VerificationReport::default();
    if corpus_programs(tables).is_empty() {
        report.issues.push(Issue {
            severity: Severity::Error,
            category: "empty-corpus",
            table: None,
            program: None,
            message: "corpus contains no notes, every draw will have zero channels".to_string(),
        });
    }
    for (index, table) in tables.iter().enumerate() {
        report.merge(VerificationReport {
            issues: check_table(index, table, config),
        });
    }
    report
}

/// Renders a verification report with one section per table that has issues. Tables are
/// labelled with names[index], which is usually the path the corpus file lists them under.
/// Issues that belong to no table are listed first, under "corpus".
pub fn format_report(report: &VerificationReport, names: &[String]) -> String {
    if report.is_clean() {
        return format!("All {} table(s) passed verification.\n", names.len());
    }

    let mut by_table: BTreeMap<Option<usize>, Vec<&Issue>> = BTreeMap::new();
    for issue in &report.issues {
        by_table.entry(issue.table).or_default().push(issue);
    }

    let mut output = String::new();
    for (table, issues) in &by_table {
        let label = match table {
            Some(index) => names
                .get(*index)
                .cloned()
                .unwrap_or_else(|| format!("table {}", index)),
            None => "corpus".to_string(),
        };
        // Writing to a String cannot fail.
        let _ = writeln!(output, "{}:", label);
        for issue in issues {
            let severity = match issue.severity {
                Severity::Warning => "warning",
                Severity::Error => "error",
            };
            let _ = writeln!(
                output,
                "  {} [{}] {}",
                severity, issue.category, issue.message
            );
        }
    }

    let affected = by_table.keys().filter(|table| table.is_some()).count();
    let _ = writeln!(
        output,
        "{} issue(s), {} of {} table(s) affected.",
        report.issues.len(),
        affected,
        names.len()
    );
    output
}

/// Prints a verification report to stdout.
pub fn print_report(report: &VerificationReport, names: &[String]) {
    print!("{}", format_report(report, names));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::test::note;

    fn config() -> SamplerConfig {
        SamplerConfig::new(4, 4, 0.5).unwrap()
    }

    fn steady(program: u8, count: usize, length: f64) -> Vec<crate::notes::Note> {
        (0..count)
            .map(|i| note(program, 60, i as f64 * length, (i + 1) as f64 * length))
            .collect()
    }

    #[test]
    fn test_check_table_clean() {
        let table = NoteTable::new(steady(0, 8, 0.5));
        assert!(check_table(0, &table, &config()).is_empty());
    }

    #[test]
    fn test_check_table_too_few_notes() {
        let mut notes = steady(0, 8, 0.5);
        notes.extend(steady(33, 3, 1.0));
        let table = NoteTable::new(notes);

        let issues = check_table(2, &table, &config());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, "too-few-notes");
        assert_eq!(issues[0].table, Some(2));
        assert_eq!(issues[0].program, Some(u7::new(33)));
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_check_table_short_span() {
        // Four notes covering one second; a bar lasts two.
        let table = NoteTable::new(steady(0, 4, 0.25));

        let issues = check_table(0, &table, &config());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].category, "short-span");
        assert!(issues[0].message.contains("program 0"));
    }

    #[test]
    fn test_check_corpus() {
        let tables = vec![
            NoteTable::new(steady(0, 8, 0.5)),
            NoteTable::new(steady(1, 2, 0.5)),
        ];
        let report = check_corpus(&tables, &config());
        assert!(!report.is_clean());
        assert!(!report.has_errors());
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].table, Some(1));
    }

    #[test]
    fn test_check_empty_corpus() {
        let report = check_corpus(&[NoteTable::default()], &config());
        assert!(report.has_errors());
        assert_eq!(report.issues[0].category, "empty-corpus");
        assert_eq!(report.issues[0].table, None);
    }

    #[test]
    fn test_format_report_clean() {
        let names = vec!["a.yaml".to_string(), "b.yaml".to_string()];
        let report = check_corpus(&[NoteTable::new(steady(0, 8, 0.5))], &config());
        assert_eq!(
            "All 2 table(s) passed verification.\n",
            format_report(&report, &names)
        );
    }

    #[test]
    fn test_format_report_labels_tables() {
        let tables = vec![
            NoteTable::new(steady(0, 8, 0.5)),
            NoteTable::new([steady(1, 2, 0.5), steady(2, 4, 0.25)].concat()),
            NoteTable::new(steady(3, 1, 0.5)),
        ];
        let names = vec![
            "intro.yaml".to_string(),
            "songs/verse.yaml".to_string(),
            "outro.yaml".to_string(),
        ];
        let report = check_corpus(&tables, &config());
        assert_eq!(report.issues.len(), 3);

        let output = format_report(&report, &names);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "songs/verse.yaml:",
                "  warning [too-few-notes] program 1 has 2 note(s), fewer than the sequence length of 4",
                "  warning [short-span] program 2 spans 1.000, shorter than one bar (2.000)",
                "outro.yaml:",
                "  warning [too-few-notes] program 3 has 1 note(s), fewer than the sequence length of 4",
                "3 issue(s), 2 of 3 table(s) affected.",
            ]
        );
        assert!(!output.contains("intro.yaml"));

        // Tables without a name fall back to their index.
        let unnamed = format_report(&report, &[]);
        assert!(unnamed.contains("table 1:\n"));
        assert!(unnamed.contains("table 2:\n"));
    }

    #[test]
    fn test_format_report_corpus_issues_first() {
        let report = check_corpus(&[NoteTable::default()], &config());
        let output = format_report(&report, &["empty.yaml".to_string()]);

        assert!(output.starts_with("corpus:\n  error [empty-corpus]"));
        assert!(output.ends_with("1 issue(s), 0 of 1 table(s) affected.\n"));
    }

    #[test]
    fn test_merge() {
        let mut report = VerificationReport::default();
        assert!(report.is_clean());
        report.merge(check_corpus(&[], &config()));
        assert_eq!(report.issues.len(), 1);
    }
}
