//! Code to parse the command line using `clap`, and definitions of the parsed
//! result

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use crate::filter::{FilterKind, FilterSpec};
use crate::style::ColorChoice;

/// Returns the parsed command line
#[must_use]
pub fn parsed() -> Args {
    Args::parse()
}

/// `Args` contains the parsed command line.
#[derive(Debug, Parser)]
#[command(name = "listkit", version, about, propagate_version = true)]
pub struct Args {
    /// The view to produce
    #[command(subcommand)]
    pub command: Command,
    /// When to color the output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
    pub color: ColorChoice,
    /// Log more to standard error (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Args {
    /// The most detailed log level to emit
    #[must_use]
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

/// The subcommands. Each operand is a file name, or `-` for standard input.
/// List items are separated by commas or newlines.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two lists: items only in A, only in B, in both, and in either
    Diff {
        /// List A
        a: PathBuf,
        /// List B
        b: PathBuf,
    },
    /// Report duplicates and print the list with duplicates removed
    Clean {
        /// The list
        input: PathBuf,
        /// Also print the input with each duplicate group marked
        #[arg(short, long)]
        mark: bool,
        /// Sort the output; repeat to sort again in the other direction
        /// (-s ascending, -ss ascending then descending, ...)
        #[arg(short, long, action = ArgAction::Count)]
        sort: u8,
    },
    /// Keep the items that pass a test
    Filter {
        /// The list
        input: PathBuf,
        /// The test to apply
        #[arg(short, long, value_enum, default_value_t = FilterKind::Contains)]
        kind: FilterKind,
        /// The text, pattern or number to test with
        #[arg(short = 'x', long, default_value = "", allow_hyphen_values = true)]
        value: String,
        /// Compare letters exactly rather than ignoring case
        #[arg(short, long)]
        case_sensitive: bool,
        /// Keep the items that fail the test instead
        #[arg(short, long)]
        invert: bool,
    },
    /// Show a JSON document as a tree
    Json {
        /// The JSON document
        input: PathBuf,
        /// Show only nodes whose value or path contains this text (ignoring case)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Expand every node
        #[arg(short, long, conflicts_with = "collapse_all")]
        expand_all: bool,
        /// Expand only the root (the default)
        #[arg(long)]
        collapse_all: bool,
        /// Expand (or collapse) the node at this path, e.g. `root.items[0]`;
        /// may be repeated, and is applied after --expand-all
        #[arg(short, long = "toggle", value_name = "PATH")]
        toggle: Vec<String>,
        /// End each line with the node's path
        #[arg(short = 'p', long)]
        show_paths: bool,
        /// Print the document re-indented instead of as a tree
        #[arg(short, long)]
        beautify: bool,
    },
}

impl Command {
    /// The `FilterSpec` described by a `Filter` command
    #[must_use]
    pub fn filter_spec(&self) -> Option<FilterSpec> {
        match self {
            Command::Filter { kind, value, case_sensitive, invert, .. } => Some(FilterSpec {
                kind: *kind,
                value: value.clone(),
                case_sensitive: *case_sensitive,
                invert: *invert,
            }),
            _ => None,
        }
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn filter_kinds_accept_camel_case_names() {
        let args = Args::try_parse_from(["listkit", "filter", "list.txt", "-k", "startsWith", "-x", "a"]).unwrap();
        let spec = args.command.filter_spec().unwrap();
        assert_eq!(spec.kind, FilterKind::StartsWith);
        assert_eq!(spec.value, "a");
        let args = Args::try_parse_from(["listkit", "filter", "-", "--kind", "length-greater", "--value", "-1"]).unwrap();
        assert_eq!(args.command.filter_spec().unwrap().kind, FilterKind::LengthGreater);
        assert_eq!(args.command.filter_spec().unwrap().value, "-1");
    }

    #[test]
    fn sort_flag_counts_repeats() {
        let args = Args::try_parse_from(["listkit", "clean", "-", "-ss", "-vv"]).unwrap();
        assert!(matches!(args.command, Command::Clean { sort: 2, mark: false, .. }));
        assert_eq!(args.log_level(), Level::DEBUG);
        assert!(args.command.filter_spec().is_none());
    }

    #[test]
    fn json_toggles_repeat() {
        let args =
            Args::try_parse_from(["listkit", "json", "doc.json", "-t", "root.a", "--toggle", "root.b", "--color", "never"])
                .unwrap();
        match args.command {
            Command::Json { toggle, .. } => assert_eq!(toggle, vec!["root.a", "root.b"]),
            other => panic!("parsed as {other:?}"),
        }
        assert_eq!(args.color, ColorChoice::Never);
        assert!(Args::try_parse_from(["listkit", "json", "d", "--expand-all", "--collapse-all"]).is_err());
    }

    #[test]
    fn requires_subcommand() {
        assert!(Args::try_parse_from(["listkit"]).is_err());
    }
}
