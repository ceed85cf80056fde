//! `listkit` works on lists typed or pasted as text, where items are separated
//! by commas or newlines, and on JSON documents.
//!
//! The engines are independent of each other and of I/O:
//! * `tokens` splits text into items,
//! * `compare` computes the four set views of two lists,
//! * `dedupe` finds duplicate groups, removes duplicates, and sorts,
//! * `filter` keeps the items passing a test, and
//! * `json` (with `viewer`) turns a document into an expandable, searchable tree.
//!
//! The `args` module parses the command line, `io` reads operands, `render`
//! and `style` lay results out as text, and `commands` ties them together.

#![cfg_attr(debug_assertions, allow(dead_code, unused_imports))]
#![deny(unused_must_use)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![deny(missing_docs)]

pub mod args;
pub mod commands;
pub mod compare;
pub mod dedupe;
pub mod filter;
pub mod io;
pub mod json;
pub mod render;
mod set;
pub mod style;
pub mod tokens;
pub mod viewer;

pub use crate::compare::{compare, Comparison};
pub use crate::dedupe::{dedupe, Dedupe, SortDirection};
pub use crate::filter::{filter, FilterError, FilterKind, FilterOutcome, FilterSpec};
pub use crate::json::{JsonError, Node};
pub use crate::tokens::tokenize;
pub use crate::viewer::JsonViewer;
