//! The JSON value model: a parsed document as a tree of tagged nodes, with a
//! path for every node, expand/collapse state, and search.
//!
//! Paths start at `root`; descending into an object member appends `.key`, and
//! descending into an array element appends `[index]`. So in
//! `{"a":1,"b":[1,2,{"c":null}]}` the `null` is at `root.b[2].c`.
//!
//! Nothing here mutates the tree. What to show is computed by `visible`, from
//! the tree, an `Expansion` and a search term that the caller holds.
use indexmap::IndexSet;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// The path of the root node
pub const ROOT: &str = "root";

/// A JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `null`
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// A number, as `serde_json` read it
    Number(serde_json::Number),
    /// A string
    String(String),
    /// An array, in source order
    Array(Vec<Node>),
    /// An object's members, in source key order
    Object(Vec<(String, Node)>),
}

/// The variant of a `Node`, without its contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `Node::Null`
    Null,
    /// `Node::Boolean`
    Boolean,
    /// `Node::Number`
    Number,
    /// `Node::String`
    String,
    /// `Node::Array`
    Array,
    /// `Node::Object`
    Object,
}

/// One step down the tree: an object member's key or an array index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'tree> {
    /// Descend into the object member named by the key
    Key(&'tree str),
    /// Descend into the array element at the index
    Index(usize),
}

impl fmt::Display for Step<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(key) => write!(f, ".{key}"),
            Step::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// The only error the model reports: text that isn't JSON
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JsonError {
    /// The parser's diagnostic
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl From<serde_json::Error> for JsonError {
    fn from(e: serde_json::Error) -> Self {
        JsonError::InvalidJson(e.to_string())
    }
}

/// The children of a composite node, each with the step that reaches it
pub type ChildIterator<'tree> = Box<dyn Iterator<Item = (Step<'tree>, &'tree Node)> + 'tree>;

/// Parses `text` as JSON.
pub fn parse(text: &str) -> Result<Node, JsonError> {
    let value: Value = serde_json::from_str(text)?;
    let node = classify(&value);
    tracing::debug!(bytes = text.len(), nodes = node.size(), "parsed JSON");
    Ok(node)
}

/// Re-serializes `text` with two-space indentation, keeping the key order.
/// Whole numbers written with a fraction or exponent (`1.0`, `2e3`, `-0`) print
/// as integers, as they do in the tree. Other numbers keep `serde_json`'s
/// formatting, so `1e21` stays `1e21` where the tree shows `1e+21`.
pub fn beautify(text: &str) -> Result<String, JsonError> {
    let mut value: Value = serde_json::from_str(text)?;
    integral_floats_to_integers(&mut value);
    Ok(serde_json::to_string_pretty(&value)?)
}

fn integral_floats_to_integers(value: &mut Value) {
    // Every integer up to this size converts exactly, in both directions
    const EXACT: f64 = 9_007_199_254_740_992.0;
    let whole = match value {
        Value::Number(n) if n.is_f64() => {
            n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() <= EXACT)
        }
        Value::Array(items) => {
            items.iter_mut().for_each(integral_floats_to_integers);
            None
        }
        Value::Object(members) => {
            members.values_mut().for_each(integral_floats_to_integers);
            None
        }
        _ => None,
    };
    if let Some(f) = whole {
        #[allow(clippy::cast_possible_truncation)]
        let whole = f as i64;
        *value = Value::from(whole);
    }
}

/// Converts a `serde_json::Value` into a `Node`.
#[must_use]
pub fn classify(value: &Value) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Boolean(*b),
        Value::Number(n) => Node::Number(n.clone()),
        Value::String(s) => Node::String(s.clone()),
        Value::Array(items) => Node::Array(items.iter().map(classify).collect()),
        Value::Object(members) => {
            Node::Object(members.iter().map(|(k, v)| (k.clone(), classify(v))).collect())
        }
    }
}

/// The path of the child reached from `parent` by `step`.
#[must_use]
pub fn build_path(parent: &str, step: Step<'_>) -> String {
    format!("{parent}{step}")
}

impl Node {
    /// Which variant this is
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Array(_) => NodeKind::Array,
            Node::Object(_) => NodeKind::Object,
        }
    }

    /// Is this an array or an object?
    #[must_use]
    pub fn is_composite(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    /// The children of an array or object; nothing for a leaf.
    #[must_use]
    pub fn children(&self) -> ChildIterator<'_> {
        match self {
            Node::Array(items) => {
                Box::new(items.iter().enumerate().map(|(i, item)| (Step::Index(i), item)))
            }
            Node::Object(members) => {
                Box::new(members.iter().map(|(key, value)| (Step::Key(key.as_str()), value)))
            }
            _ => Box::new(std::iter::empty()),
        }
    }

    /// The text a leaf is searched by: `null`, `true`/`false`, the number, or
    /// the string without quotes. `None` for arrays and objects.
    #[must_use]
    pub fn leaf_text(&self) -> Option<String> {
        match self {
            Node::Null => Some("null".to_string()),
            Node::Boolean(b) => Some(b.to_string()),
            Node::Number(n) => Some(number_text(n)),
            Node::String(s) => Some(s.clone()),
            Node::Array(_) | Node::Object(_) => None,
        }
    }

    /// The number of nodes in this tree, counting this one
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().map(|(_, child)| child.size()).sum::<usize>()
    }
}

/// Integers print as integers. Other numbers print the way a browser shows
/// them: the shortest digits that read back as the same value, in plain
/// notation between 1e-6 and 1e21 and in exponent notation (`1e+21`, `1.5e-7`)
/// outside it. `1.0` prints as `1` and `-0` as `0`.
fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else if let Some(f) = n.as_f64() {
        float_text(f)
    } else {
        n.to_string()
    }
}

fn float_text(f: f64) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    if !f.is_finite() {
        return f.to_string();
    }
    // `{:e}` gives the shortest round-trip digits as `d.ddde<exp>`
    let scientific = format!("{:e}", f.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    // The decimal point sits `point` digits from the left of `digits`
    let point = exponent + 1;
    let len = i32::try_from(digits.len()).unwrap_or(i32::MAX);

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat(usize::try_from(point - len).unwrap_or(0)))
    } else if 0 < point && point <= 21 {
        let (whole, fraction) = digits.split_at(usize::try_from(point).unwrap_or(0));
        format!("{whole}.{fraction}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(usize::try_from(-point).unwrap_or(0)))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        format!("{first}{rest}e{sign}{}", exponent.unsigned_abs())
    };
    if f < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Does `node`, found at `path`, match the search `term`? Matching ignores case.
/// * An empty term matches everything.
/// * A leaf matches if its text or its path contains the term.
/// * An array or object matches if any node below it, at any depth, matches.
///   Its own path doesn't count.
#[must_use]
pub fn matches_search(node: &Node, path: &str, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    matches_lowered(node, path, &term.to_lowercase())
}

fn matches_lowered(node: &Node, path: &str, term: &str) -> bool {
    match node.leaf_text() {
        Some(text) => {
            text.to_lowercase().contains(term) || path.to_lowercase().contains(term)
        }
        None => node
            .children()
            .any(|(step, child)| matches_lowered(child, &build_path(path, step), term)),
    }
}

/// Every path in `tree`, in depth-first pre-order, starting with `root`.
#[must_use]
pub fn all_paths(tree: &Node) -> Vec<String> {
    fn collect(node: &Node, path: &str, out: &mut Vec<String>) {
        out.push(path.to_string());
        for (step, child) in node.children() {
            collect(child, &build_path(path, step), out);
        }
    }
    let mut out = Vec::with_capacity(tree.size());
    collect(tree, ROOT, &mut out);
    out
}

/// The set of expanded paths. A new `Expansion` has just `root` expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    paths: IndexSet<String>,
}

impl Default for Expansion {
    fn default() -> Self {
        Self::new()
    }
}

impl Expansion {
    /// Just `root` expanded
    #[must_use]
    pub fn new() -> Self {
        let mut paths = IndexSet::new();
        paths.insert(ROOT.to_string());
        Expansion { paths }
    }

    /// Is `path` expanded?
    #[must_use]
    pub fn is_expanded(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Expands `path` if it's collapsed, and collapses it if it's expanded.
    /// Nothing above or below `path` changes.
    pub fn toggle(&mut self, path: &str) {
        if !self.paths.shift_remove(path) {
            self.paths.insert(path.to_string());
        }
    }

    /// Expands every path in `tree`
    pub fn expand_all(&mut self, tree: &Node) {
        self.paths = all_paths(tree).into_iter().collect();
    }

    /// Back to just `root`
    pub fn collapse_all(&mut self) {
        *self = Self::new();
    }

    /// The expanded paths, in the order they were expanded
    pub fn paths(&self) -> impl Iterator<Item = &str> + '_ {
        self.paths.iter().map(String::as_str)
    }
}

/// A node as it should be displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleNode<'tree> {
    /// Where the node is
    pub path: String,
    /// How the node's parent reaches it; `None` for the root
    pub label: Option<Step<'tree>>,
    /// The node's variant
    pub kind: NodeKind,
    /// The leaf's value as displayed (strings in quotes), or `N items` for an
    /// array, or `N keys` for an object
    pub summary: String,
    /// True for an array or object whose children are shown
    pub expanded: bool,
    /// The children to show: empty unless `expanded`, and without children
    /// that don't match the search term
    pub children: Vec<VisibleNode<'tree>>,
}

impl VisibleNode<'_> {
    /// The paths of this node and every visible node below it, in pre-order
    #[must_use]
    pub fn paths(&self) -> Vec<&str> {
        let mut out = vec![self.path.as_str()];
        for child in &self.children {
            out.extend(child.paths());
        }
        out
    }
}

/// Computes what to display of `tree`, given which paths are expanded and the
/// search term. Returns `None` when the search term rules out the whole tree.
/// A node failing the search is left out along with everything below it, at
/// every level; children are listed only for expanded nodes.
#[must_use]
pub fn visible<'tree>(
    tree: &'tree Node,
    expansion: &Expansion,
    term: &str,
) -> Option<VisibleNode<'tree>> {
    let term = term.to_lowercase();
    visit(tree, ROOT.to_string(), None, expansion, &term)
}

// Each node is judged once: an expanded composite matches when one of its
// visited children does, and a collapsed one is searched just once, by
// `matches_lowered`, since nothing below it is visited.
fn visit<'tree>(
    node: &'tree Node,
    path: String,
    label: Option<Step<'tree>>,
    expansion: &Expansion,
    term: &str,
) -> Option<VisibleNode<'tree>> {
    let expanded = node.is_composite() && expansion.is_expanded(&path);
    let children: Vec<_> = if expanded {
        node.children()
            .filter_map(|(step, child)| {
                visit(child, build_path(&path, step), Some(step), expansion, term)
            })
            .collect()
    } else {
        Vec::new()
    };
    let matched = term.is_empty()
        || if expanded { !children.is_empty() } else { matches_lowered(node, &path, term) };
    if !matched {
        return None;
    }
    let summary = match node {
        Node::String(s) => format!("\"{s}\""),
        Node::Array(items) => format!("{} items", items.len()),
        Node::Object(members) => format!("{} keys", members.len()),
        leaf => leaf.leaf_text().unwrap_or_default(),
    };
    Some(VisibleNode { path, label, kind: node.kind(), summary, expanded, children })
}
