//! Provides the `TokenSet` structure, an insertion-ordered set of tokens
//! borrowed from the text they were found in.
use fxhash::FxBuildHasher;
use indexmap::IndexMap;

/// A `TokenSet` is a set of tokens, each token represented as a key of an `IndexMap`.
/// * Keys are `&'data str`, borrowed from the text the tokens were split from
/// * Keys keep the order in which they were first inserted; inserting a token
///   that is already present changes neither its position nor its value
/// * Each operation (`compare`, `dedupe`) associates a small bookkeeping value
///   with each key. The value type differs from operation to operation.
#[derive(Debug, Clone)]
pub(crate) struct TokenSet<'data, Bookkeeping> {
    set: IndexMap<&'data str, Bookkeeping, FxBuildHasher>,
}

impl<'data, Bookkeeping> Default for TokenSet<'data, Bookkeeping> {
    fn default() -> Self {
        TokenSet { set: IndexMap::default() }
    }
}

impl<'data, Bookkeeping: Copy> TokenSet<'data, Bookkeeping> {
    /// `TokenSet::with(tokens, b)` returns the set of distinct `tokens`, each
    /// with the bookkeeping value `b`.
    pub(crate) fn with(tokens: &[&'data str], b: Bookkeeping) -> Self {
        let mut set = Self::default();
        for &token in tokens {
            set.insert(token, b);
        }
        set
    }
}

impl<'data, Bookkeeping> TokenSet<'data, Bookkeeping> {
    /// Insert `token` with bookkeeping value `b`, unless it's already present
    pub(crate) fn insert(&mut self, token: &'data str, b: Bookkeeping) {
        self.set.entry(token).or_insert(b);
    }

    /// Insert `token` if it's absent, then hand its bookkeeping value to `update`.
    pub(crate) fn upsert(
        &mut self,
        token: &'data str,
        new: impl FnOnce() -> Bookkeeping,
        update: impl FnOnce(&mut Bookkeeping),
    ) {
        update(self.set.entry(token).or_insert_with(new));
    }

    /// Sometimes we need to update the bookkeeping information
    pub(crate) fn get_mut(&mut self, token: &str) -> Option<&mut Bookkeeping> {
        self.set.get_mut(token)
    }

    pub(crate) fn get(&self, token: &str) -> Option<&Bookkeeping> {
        self.set.get(token)
    }

    pub(crate) fn contains(&self, token: &str) -> bool {
        self.set.contains_key(token)
    }

    pub(crate) fn len(&self) -> usize {
        self.set.len()
    }

    /// The tokens, in first-insertion order
    pub(crate) fn tokens(&self) -> impl Iterator<Item = &'data str> + '_ {
        self.set.keys().copied()
    }

    /// The tokens whose bookkeeping value passes `wanted`, in first-insertion order
    pub(crate) fn tokens_where<'a>(
        &'a self,
        mut wanted: impl FnMut(&Bookkeeping) -> bool + 'a,
    ) -> impl Iterator<Item = &'data str> + 'a {
        self.set.iter().filter_map(move |(k, v)| wanted(v).then_some(*k))
    }

    /// Tokens with their bookkeeping values, in first-insertion order
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&'data str, &Bookkeeping)> + '_ {
        self.set.iter().map(|(k, v)| (*k, v))
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn reinserting_keeps_the_first_position_and_value() {
        let mut set = TokenSet::with(&["b", "a", "b"], 1);
        set.insert("a", 2);
        set.insert("c", 3);
        let got: Vec<_> = set.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(got, vec![("b", 1), ("a", 1), ("c", 3)]);
    }

    #[test]
    fn tokens_where_filters_with_a_borrowed_predicate() {
        let mut set = TokenSet::with(&["x", "y", "z", "w"], false);
        for token in ["z", "x"] {
            if let Some(seen) = set.get_mut(token) {
                *seen = true;
            }
        }
        let wanted = true;
        let picked = set.tokens_where(|seen| *seen == wanted);
        assert_eq!(picked.collect::<Vec<_>>(), vec!["x", "z"]);
        assert_eq!(set.len(), 4);
        assert!(set.contains("z"));
        assert!(!set.contains("v"));
    }

    #[test]
    fn upsert_counts_occurrences() {
        let mut set = TokenSet::default();
        for token in ["a", "b", "a", "a"] {
            set.upsert(token, || 0, |n| *n += 1);
        }
        assert_eq!(set.tokens_where(|n| *n > 1).collect::<Vec<_>>(), vec!["a"]);
    }
}
