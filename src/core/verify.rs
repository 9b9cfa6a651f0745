//! Integrity check for a written roster: the header names every output
//! column and each data row carries exactly one non-empty value per column.

use crate::domain::model::OUT_COLUMNS;
use crate::utils::error::Result;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowProblem {
    /// 1-based line in the file; the header is line 1.
    pub line: u64,
    pub fields: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct RosterReport {
    pub rows: usize,
    pub problems: Vec<RowProblem>,
}

impl RosterReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    /// One line per problem, line numbers right-aligned.
    pub fn render(&self) -> String {
        let width = self
            .problems
            .iter()
            .map(|p| p.line.to_string().len())
            .max()
            .unwrap_or(1);

        let mut message = String::from("Lines with incorrect columns:\n");
        for problem in &self.problems {
            // Writing to a String cannot fail.
            let _ = writeln!(
                message,
                "[line {:>width$}]: {} ({})",
                problem.line,
                problem.fields.join(","),
                problem.reason,
                width = width
            );
        }
        message
    }
}

pub fn check_roster(content: &[u8]) -> Result<RosterReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content);

    let header: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut report = RosterReport::default();

    for column in OUT_COLUMNS {
        if !header.iter().any(|h| h == column) {
            report.problems.push(RowProblem {
                line: 1,
                fields: header.clone(),
                reason: format!("missing column '{}'", column),
            });
        }
    }

    for record in reader.records() {
        let record = record?;
        report.rows += 1;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let fields: Vec<String> = record.iter().map(str::to_string).collect();

        let reason = if fields.len() != header.len() {
            Some(format!(
                "expected {} fields, found {}",
                header.len(),
                fields.len()
            ))
        } else {
            fields
                .iter()
                .zip(&header)
                .find(|(value, _)| value.trim().is_empty())
                .map(|(_, column)| format!("empty '{}'", column))
        };

        if let Some(reason) = reason {
            report.problems.push(RowProblem {
                line,
                fields,
                reason,
            });
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_roster() {
        let report = check_roster(
            b"account,name,link\n@alice@example.social,Alice,https://example.social/@alice\n",
        )
        .unwrap();
        assert_eq!(report.rows, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_reports_short_long_and_empty_rows() {
        let content = b"account,name,link\n\
@a@x.org,A,https://x.org/@a\n\
@b@x.org,B\n\
@c@x.org,C,https://x.org/@c,extra\n\
@d@x.org,,https://x.org/@d\n";
        let report = check_roster(content).unwrap();

        assert_eq!(report.rows, 4);
        let lines: Vec<u64> = report.problems.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert_eq!(report.problems[0].reason, "expected 3 fields, found 2");
        assert_eq!(report.problems[2].reason, "empty 'name'");
    }

    #[test]
    fn test_missing_header_column() {
        let report = check_roster(b"account,name\n@a@x.org,A\n").unwrap();
        assert_eq!(report.problems.len(), 1);
        assert_eq!(report.problems[0].line, 1);
        assert_eq!(report.problems[0].reason, "missing column 'link'");
    }

    #[test]
    fn test_render_aligns_line_numbers() {
        let report = RosterReport {
            rows: 12,
            problems: vec![
                RowProblem {
                    line: 3,
                    fields: vec!["@b@x.org".to_string(), "B".to_string()],
                    reason: "expected 3 fields, found 2".to_string(),
                },
                RowProblem {
                    line: 12,
                    fields: vec!["@c@x.org".to_string()],
                    reason: "expected 3 fields, found 1".to_string(),
                },
            ],
        };
        let rendered = report.render();
        assert!(rendered.contains("[line  3]: @b@x.org,B (expected 3 fields, found 2)"));
        assert!(rendered.contains("[line 12]: @c@x.org (expected 3 fields, found 1)"));
    }
}
