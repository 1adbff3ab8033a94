//! Plain-text rendering of refutation results.

use std::fmt;

use super::refute::{DerivationRow, RefutationOutcome, RefutationReport};

const HEADERS: [&str; 5] = ["Derived", "From", "With", "Resolved", "Clause"];

/// Render derivation rows as an aligned table with a header and a rule line.
pub fn derivation_table(rows: &[DerivationRow]) -> String {
    let cells: Vec<[String; 5]> = rows
        .iter()
        .map(|row| {
            [
                row.derived.to_string(),
                row.left.to_string(),
                row.right.to_string(),
                row.resolved.to_string(),
                row.clause.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width - cell.chars().count();
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

impl fmt::Display for RefutationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefutationOutcome::Contradiction => write!(f, "contradiction"),
            RefutationOutcome::Saturated => write!(f, "saturated"),
            RefutationOutcome::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

impl fmt::Display for RefutationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.log {
            writeln!(f, "{}", line)?;
        }
        if !self.derivations.is_empty() {
            writeln!(f)?;
            write!(f, "{}", derivation_table(&self.derivations))?;
        }
        write!(
            f,
            "Result: {} ({} steps, {} rounds)",
            self.outcome, self.steps, self.rounds
        )
    }
}
