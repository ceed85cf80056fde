//! Houses the `compare` function, which treats two token sequences as sets
//!
use crate::set::TokenSet;

/// The result of comparing list A with list B. Every field is free of
/// duplicates and lists its tokens in the order they first appear in the
/// list(s) that define it; nothing is sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comparison<'data> {
    /// Tokens of A that never occur in B, in A's order
    pub only_in_a: Vec<&'data str>,
    /// Tokens of B that never occur in A, in B's order
    pub only_in_b: Vec<&'data str>,
    /// Tokens of A that also occur in B, in A's order (not B's)
    pub common: Vec<&'data str>,
    /// Every distinct token of A, followed by the tokens only B has
    pub union: Vec<&'data str>,
}

/// Item counts for each part of a `Comparison`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonCounts {
    /// `only_in_a.len()`
    pub only_in_a: usize,
    /// `only_in_b.len()`
    pub only_in_b: usize,
    /// `common.len()`
    pub common: usize,
    /// `union.len()`
    pub union: usize,
}

impl Comparison<'_> {
    /// The number of tokens in each of the four parts
    #[must_use]
    pub fn counts(&self) -> ComparisonCounts {
        ComparisonCounts {
            only_in_a: self.only_in_a.len(),
            only_in_b: self.only_in_b.len(),
            common: self.common.len(),
            union: self.union.len(),
        }
    }
}

/// Compares `a` with `b`:
///
/// * `only_in_a` holds the tokens of `a` that don't occur in `b`,
/// * `only_in_b` holds the tokens of `b` that don't occur in `a`,
/// * `common` holds the tokens of `a` that also occur in `b`, and
/// * `union` holds the tokens that occur in either.
///
#[must_use]
pub fn compare<'data>(a: &[&'data str], b: &[&'data str]) -> Comparison<'data> {
    // For each distinct token of A, the bookkeeping value says whether B has it
    // too. That one pass gives us both `only_in_a` and `common`.
    let mut in_a = TokenSet::with(a, false);
    for &token in b {
        if let Some(seen_in_b) = in_a.get_mut(token) {
            *seen_in_b = true;
        }
    }
    let only_in_a: Vec<_> = in_a.tokens_where(|seen_in_b| !*seen_in_b).collect();
    let common: Vec<_> = in_a.tokens_where(|seen_in_b| *seen_in_b).collect();

    // `Union` doesn't need bookkeeping, so we use the unit type as its
    // bookkeeping value. Tokens of A are inserted first, so they keep their
    // places ahead of anything B adds.
    let mut union = TokenSet::with(a, ());
    let mut only_in_b = Vec::new();
    for &token in b {
        if !union.contains(token) {
            only_in_b.push(token);
            union.insert(token, ());
        }
    }

    let comparison = Comparison { only_in_a, only_in_b, common, union: union.tokens().collect() };
    tracing::debug!(
        a = a.len(),
        b = b.len(),
        distinct_a = in_a.len(),
        counts = ?comparison.counts(),
        "compared lists"
    );
    comparison
}
