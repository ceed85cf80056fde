//! Writes engine results as text. Nothing here computes anything; each
//! function lays out a result it's given.
use anyhow::Result;
use std::io::Write;

use crate::compare::Comparison;
use crate::dedupe::Dedupe;
use crate::filter::FilterOutcome;
use crate::json::{NodeKind, Step, VisibleNode};
use crate::style::StyleSheet;

/// Writes one token per line
pub fn list(out: &mut dyn Write, tokens: &[&str]) -> Result<()> {
    for token in tokens {
        writeln!(out, "{token}")?;
    }
    Ok(())
}

fn items(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{n} items")
    }
}

/// Writes a titled section: the title with its item count, then the tokens,
/// or `None` if there aren't any
fn section(out: &mut dyn Write, sheet: &StyleSheet, title: &str, tokens: &[&str]) -> Result<()> {
    let count = format!("({})", items(tokens.len()));
    writeln!(out, "{} {}", sheet.heading(title), sheet.count(&count))?;
    if tokens.is_empty() {
        writeln!(out, "None")?;
    } else {
        list(out, tokens)?;
    }
    Ok(())
}

/// Writes the four parts of a comparison, after the sizes of the two inputs
pub fn comparison(
    out: &mut dyn Write,
    sheet: &StyleSheet,
    comparison: &Comparison<'_>,
    input_sizes: (usize, usize),
) -> Result<()> {
    let (a, b) = input_sizes;
    writeln!(out, "{} {}", sheet.heading("List A:"), sheet.count(&items(a)))?;
    writeln!(out, "{} {}", sheet.heading("List B:"), sheet.count(&items(b)))?;
    let parts = [
        ("Only in A (but not in B)", &comparison.only_in_a),
        ("Only in B (but not in A)", &comparison.only_in_b),
        ("A ∩ B (A AND B)", &comparison.common),
        ("A ∪ B (A OR B)", &comparison.union),
    ];
    for (title, tokens) in parts {
        writeln!(out)?;
        section(out, sheet, title, tokens)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes the duplicates found, optionally the input with duplicates marked,
/// and the cleaned-up list
pub fn cleaned(
    out: &mut dyn Write,
    sheet: &StyleSheet,
    dedupe: &Dedupe<'_>,
    marked: Option<&[(&str, Option<usize>)]>,
    output: &[&str],
) -> Result<()> {
    if !dedupe.duplicate_groups.is_empty() {
        let found: Vec<&str> = dedupe.duplicates().collect();
        writeln!(out, "{} {}", sheet.heading("Duplicates found:"), found.join(", "))?;
        writeln!(out)?;
    }
    if let Some(marked) = marked {
        writeln!(out, "{}", sheet.heading("Marked input (duplicates highlighted):"))?;
        for &(token, color) in marked {
            match color {
                Some(color) => {
                    let tag = format!("(duplicate group {})", color + 1);
                    writeln!(out, "{}  {}", sheet.duplicate(token, color), sheet.count(&tag))?;
                }
                None => writeln!(out, "{token}")?,
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", sheet.heading("Output list:"))?;
    list(out, output)?;
    out.flush()?;
    Ok(())
}

/// Writes a filter's counts and, when there's no error, the filtered list.
/// With `invert`, the matched count is labelled as the number excluded.
pub fn filtered(
    out: &mut dyn Write,
    sheet: &StyleSheet,
    outcome: &FilterOutcome<'_>,
    invert: bool,
) -> Result<()> {
    let matched_label = if invert { "Excluded:" } else { "Matched:" };
    let stats = [
        ("Total items:", outcome.total),
        (matched_label, outcome.matched_count),
        ("Filtered result:", outcome.filtered_count),
    ];
    for (label, n) in stats {
        writeln!(out, "{} {}", sheet.heading(label), sheet.count(&n.to_string()))?;
    }
    if outcome.error.is_none() && !outcome.filtered.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", sheet.heading("Filtered list:"))?;
        list(out, &outcome.filtered)?;
    }
    out.flush()?;
    Ok(())
}

/// Writes a JSON tree, one node per line, indented two spaces per level.
/// Arrays and objects show `▼` when expanded and `▶` when collapsed. With
/// `show_paths`, each line ends with the node's path.
pub fn tree(
    out: &mut dyn Write,
    sheet: &StyleSheet,
    root: &VisibleNode<'_>,
    show_paths: bool,
) -> Result<()> {
    fn line(
        out: &mut dyn Write,
        sheet: &StyleSheet,
        node: &VisibleNode<'_>,
        depth: usize,
        show_paths: bool,
    ) -> Result<()> {
        let indent = "  ".repeat(depth);
        let label = match node.label {
            None => "root".to_string(),
            Some(Step::Key(key)) => key.to_string(),
            Some(Step::Index(index)) => index.to_string(),
        };
        write!(out, "{indent}")?;
        let (open, close) = match node.kind {
            NodeKind::Array => ("[", "]"),
            NodeKind::Object => ("{", "}"),
            _ => ("", ""),
        };
        if open.is_empty() {
            let value = match node.kind {
                NodeKind::String => sheet.string(&node.summary),
                NodeKind::Number => sheet.number(&node.summary),
                _ => sheet.literal(&node.summary),
            };
            write!(out, "{}: {value}", sheet.key(&label))?;
        } else {
            let toggle = if node.expanded { "▼" } else { "▶" };
            write!(
                out,
                "{} {}: {}{}{}",
                sheet.punctuation(toggle),
                sheet.key(&label),
                sheet.punctuation(open),
                sheet.count(&node.summary),
                sheet.punctuation(close),
            )?;
        }
        if show_paths {
            write!(out, "  {}", sheet.punctuation(&node.path))?;
        }
        writeln!(out)?;
        for child in &node.children {
            line(out, sheet, child, depth + 1, show_paths)?;
        }
        Ok(())
    }
    line(out, sheet, root, 0, show_paths)?;
    out.flush()?;
    Ok(())
}

/// Writes an error message the user should see as is
pub fn error(err: &mut dyn Write, sheet: &StyleSheet, message: &str) -> Result<()> {
    writeln!(err, "{}", sheet.error(message))?;
    err.flush()?;
    Ok(())
}
