//! Houses the `run` function, which reads a command's operands, feeds them to
//! the command's engine, and writes the result.
use anyhow::Result;
use std::io::Write;

use crate::args::Command;
use crate::compare::compare;
use crate::dedupe::{dedupe, mark, sort, SortDirection};
use crate::filter::filter;
use crate::io::read_operand;
use crate::json::{beautify, Node};
use crate::render;
use crate::style::StyleSheet;
use crate::tokens::tokenize;
use crate::viewer::JsonViewer;

/// How a command went, when it didn't fail outright
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Status {
    /// The view was produced
    Success,
    /// The user's input was rejected (a bad pattern, length or JSON
    /// document); the message has been written
    InputError,
}

/// Runs `command`, writing its view to `out` and input errors to `err`. I/O
/// problems (an unreadable operand, a closed pipe) are returned as errors;
/// problems with what the user typed are reported on `err` and give
/// `Status::InputError`.
pub fn run(
    command: &Command,
    sheet: &StyleSheet,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<Status> {
    match command {
        Command::Diff { a, b } => {
            let (text_a, text_b) = (read_operand(a)?, read_operand(b)?);
            let (tokens_a, tokens_b) = (tokenize(&text_a), tokenize(&text_b));
            let comparison = compare(&tokens_a, &tokens_b);
            render::comparison(out, sheet, &comparison, (tokens_a.len(), tokens_b.len()))?;
            Ok(Status::Success)
        }

        Command::Clean { input, mark: show_marks, sort: times } => {
            let text = read_operand(input)?;
            let tokens = tokenize(&text);
            let deduped = dedupe(&tokens);
            let marked = show_marks.then(|| mark(&tokens, &deduped));

            // Each repeat sorts the previous output, flipping direction each time
            let mut direction = SortDirection::default();
            let mut output = deduped.unique.clone();
            for _ in 0..*times {
                output = sort(&output, direction.toggle());
            }
            tracing::debug!(sorts = times, next_direction = ?direction, "cleaned list");

            render::cleaned(out, sheet, &deduped, marked.as_deref(), &output)?;
            Ok(Status::Success)
        }

        Command::Filter { input, invert, .. } => {
            let spec = command.filter_spec().unwrap_or_default();
            let text = read_operand(input)?;
            let tokens = tokenize(&text);
            let outcome = filter(&tokens, &spec);
            render::filtered(out, sheet, &outcome, *invert)?;
            match &outcome.error {
                None => Ok(Status::Success),
                Some(e) => {
                    render::error(err, sheet, &e.to_string())?;
                    Ok(Status::InputError)
                }
            }
        }

        Command::Json {
            input,
            search,
            expand_all,
            collapse_all,
            toggle,
            show_paths,
            beautify: pretty,
        } => {
            let text = read_operand(input)?;
            if *pretty {
                return match beautify(&text) {
                    Ok(pretty) => {
                        writeln!(out, "{pretty}")?;
                        out.flush()?;
                        Ok(Status::Success)
                    }
                    Err(e) => {
                        render::error(err, sheet, &e.to_string())?;
                        Ok(Status::InputError)
                    }
                };
            }

            let mut viewer = JsonViewer::default();
            viewer.set_search(search.as_str());
            if let Err(e) = viewer.load(&text) {
                render::error(err, sheet, &e.to_string())?;
                return Ok(Status::InputError);
            }
            if *expand_all {
                viewer.expand_all();
            } else if *collapse_all {
                viewer.collapse_all();
            }
            for path in toggle {
                viewer.toggle(path);
            }
            tracing::debug!(
                nodes = viewer.tree().map_or(0, Node::size),
                expanded = viewer.expansion().paths().count(),
                "showing JSON tree"
            );
            match viewer.visible() {
                Some(shown) => render::tree(out, sheet, &shown, *show_paths)?,
                None => tracing::info!(search = %viewer.search(), "no node matches the search"),
            }
            Ok(Status::Success)
        }
    }
}
