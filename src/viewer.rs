//! `JsonViewer`: the state a JSON tree view keeps between user actions.
use crate::json::{parse, visible, Expansion, JsonError, Node, VisibleNode};

/// The parsed document, which of its paths are expanded, and the search term.
/// Loading new text replaces the document and expands just `root`; text that
/// fails to parse clears the document. The search term is kept across loads.
#[derive(Debug, Default)]
pub struct JsonViewer {
    tree: Option<Node>,
    expansion: Expansion,
    search: String,
}

impl JsonViewer {
    /// Parses `text` and shows it with only `root` expanded.
    pub fn load(&mut self, text: &str) -> Result<(), JsonError> {
        match parse(text) {
            Ok(tree) => {
                self.tree = Some(tree);
                self.expansion = Expansion::new();
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "cleared JSON view");
                self.tree = None;
                Err(e)
            }
        }
    }

    /// The document, if one is loaded
    #[must_use]
    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// The expanded paths
    #[must_use]
    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    /// The current search term
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Replaces the search term
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    /// Expands or collapses `path`
    pub fn toggle(&mut self, path: &str) {
        self.expansion.toggle(path);
    }

    /// Expands every path of the loaded document. Does nothing when no document
    /// is loaded.
    pub fn expand_all(&mut self) {
        if let Some(tree) = &self.tree {
            self.expansion.expand_all(tree);
        }
    }

    /// Expands just `root`
    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// What to display now: `None` when no document is loaded or nothing
    /// matches the search term
    #[must_use]
    pub fn visible(&self) -> Option<VisibleNode<'_>> {
        visible(self.tree.as_ref()?, &self.expansion, &self.search)
    }
}
