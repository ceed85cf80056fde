//! Duplicate detection, duplicate removal and sorting for a single list.
//!
//! `dedupe` reports which tokens repeat (and where) and returns the list with
//! every repeat dropped. `sort` orders a list for display; the direction it
//! sorts in is owned by the caller as a `SortDirection`, which flips each time
//! it's used via `SortDirection::toggle`.
use std::cmp::Ordering;

use crate::set::TokenSet;

/// Background colors for marking duplicate groups, as `#rrggbb` strings.
/// Group `n` gets `DUPLICATE_PALETTE[n % DUPLICATE_PALETTE.len()]`.
pub const DUPLICATE_PALETTE: [&str; 12] = [
    "#ffebee", "#e3f2fd", "#f3e5f5", "#e8f5e9", "#fff3e0", "#fce4ec", "#e0f2f1", "#fff9c4",
    "#f1f8e9", "#e8eaf6", "#fef5e7", "#fce4ec",
];

/// A token that occurs more than once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup<'data> {
    /// The repeated token
    pub value: &'data str,
    /// Every position (0-based, in the input sequence) at which `value` occurs
    pub positions: Vec<usize>,
    /// Index into `DUPLICATE_PALETTE` used to mark this group
    pub color: usize,
}

/// The result of `dedupe`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dedupe<'data> {
    /// The duplicate groups, in order of each value's first occurrence
    pub duplicate_groups: Vec<DuplicateGroup<'data>>,
    /// The first occurrence of each distinct token, in input order
    pub unique: Vec<&'data str>,
}

impl<'data> Dedupe<'data> {
    /// Just the repeated values
    pub fn duplicates(&self) -> impl Iterator<Item = &'data str> + '_ {
        self.duplicate_groups.iter().map(|g| g.value)
    }
}

/// Finds the duplicate groups of `tokens`, and the tokens with duplicates removed.
#[must_use]
pub fn dedupe<'data>(tokens: &[&'data str]) -> Dedupe<'data> {
    let mut seen = TokenSet::<Vec<usize>>::default();
    for (position, &token) in tokens.iter().enumerate() {
        seen.upsert(token, Vec::new, |positions| positions.push(position));
    }

    let colors = assign_colors(seen.tokens_where(|p| p.len() > 1), DUPLICATE_PALETTE.len());
    let duplicate_groups: Vec<_> = seen
        .iter()
        .filter(|(_, positions)| positions.len() > 1)
        .zip(colors)
        .map(|((value, positions), (_, color))| DuplicateGroup {
            value,
            positions: positions.clone(),
            color,
        })
        .collect();

    let unique: Vec<_> = seen.tokens().collect();
    tracing::debug!(
        tokens = tokens.len(),
        unique = unique.len(),
        duplicate_groups = duplicate_groups.len(),
        "deduplicated list"
    );
    Dedupe { duplicate_groups, unique }
}

/// Pairs each of `values` with a palette index: the first value gets 0, the
/// next 1, and so on, wrapping around after `palette_len` values. A
/// `palette_len` of zero is treated as one.
#[must_use]
pub fn assign_colors<'data>(
    values: impl IntoIterator<Item = &'data str>,
    palette_len: usize,
) -> Vec<(&'data str, usize)> {
    let palette_len = palette_len.max(1);
    values.into_iter().enumerate().map(|(n, value)| (value, n % palette_len)).collect()
}

/// Returns every token of `tokens`, in order, paired with the palette index of
/// its duplicate group (or `None` for tokens that occur only once).
#[must_use]
pub fn mark<'data>(tokens: &[&'data str], dedupe: &Dedupe<'_>) -> Vec<(&'data str, Option<usize>)> {
    let colors: TokenSet<usize> = {
        let mut set = TokenSet::default();
        for group in &dedupe.duplicate_groups {
            set.insert(group.value, group.color);
        }
        set
    };
    tokens
        .iter()
        .map(|&token| (token, colors.get(token).copied()))
        .collect()
}

/// The direction `sort` orders a list in
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default)]
pub enum SortDirection {
    /// A to Z
    #[default]
    Ascending,
    /// Z to A
    Descending,
}

impl SortDirection {
    /// The other direction
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Returns the direction to sort in now, and flips `self` so the next call
    /// sorts the other way.
    pub fn toggle(&mut self) -> Self {
        let now = *self;
        *self = now.flipped();
        now
    }
}

/// Returns a sorted copy of `tokens`. The sort is stable.
#[must_use]
pub fn sort<'data>(tokens: &[&'data str], direction: SortDirection) -> Vec<&'data str> {
    let mut sorted = tokens.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| locale_cmp(a, b)),
        SortDirection::Descending => sorted.sort_by(|a, b| locale_cmp(b, a)),
    }
    sorted
}

/// Dictionary order: letters compare without regard to case first, then a
/// lowercase letter sorts before its uppercase twin, and only then do raw code
/// points decide.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| {
        for (x, y) in a.chars().zip(b.chars()) {
            if x != y {
                match (x.is_lowercase(), y.is_lowercase()) {
                    (true, false) => return Ordering::Less,
                    (false, true) => return Ordering::Greater,
                    _ => return x.cmp(&y),
                }
            }
        }
        a.len().cmp(&b.len())
    })
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use crate::tokens::tokenize;

    #[test]
    fn finds_groups_and_positions_in_first_occurrence_order() {
        let tokens = tokenize("xxx\nabc\nxxx\nyyy\nxxx\nabc");
        let d = dedupe(&tokens);
        assert_eq!(d.unique, vec!["xxx", "abc", "yyy"]);
        assert_eq!(
            d.duplicate_groups,
            vec![
                DuplicateGroup { value: "xxx", positions: vec![0, 2, 4], color: 0 },
                DuplicateGroup { value: "abc", positions: vec![1, 5], color: 1 },
            ]
        );
        assert_eq!(d.duplicates().collect::<Vec<_>>(), vec!["xxx", "abc"]);
    }

    #[test]
    fn empty_input_is_not_an_error() {
        assert_eq!(dedupe(&[]), Dedupe::default());
    }

    #[test]
    fn dedupe_is_idempotent() {
        for text in ["a,b,a,c,b,a", "", "one", "z\ny\nz\nz\nx"] {
            let once = dedupe(&tokenize(text)).unique;
            let twice = dedupe(&once).unique;
            assert_eq!(once, twice, "for {text:?}");
            assert!(dedupe(&once).duplicate_groups.is_empty());
        }
    }

    #[test]
    fn colors_cycle_through_the_palette() {
        let text: Vec<String> = (0..14).flat_map(|n| [n.to_string(), n.to_string()]).collect();
        let tokens: Vec<&str> = text.iter().map(String::as_str).collect();
        let d = dedupe(&tokens);
        let colors: Vec<usize> = d.duplicate_groups.iter().map(|g| g.color).collect();
        assert_eq!(colors, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0, 1]);
    }

    #[test]
    fn assign_colors_is_a_pure_function_of_order() {
        assert_eq!(assign_colors(["p", "q", "r"], 2), vec![("p", 0), ("q", 1), ("r", 0)]);
        assert_eq!(assign_colors(["p", "q"], 0), vec![("p", 0), ("q", 0)]);
    }

    #[test]
    fn mark_tags_only_duplicates() {
        let tokens = tokenize("a,b,a,c,c");
        let d = dedupe(&tokens);
        assert_eq!(
            mark(&tokens, &d),
            vec![("a", Some(0)), ("b", None), ("a", Some(0)), ("c", Some(1)), ("c", Some(1))]
        );
    }

    #[test]
    fn sort_is_case_insensitive_first() {
        let tokens = ["banana", "Apple", "cherry", "apple", "Banana"];
        assert_eq!(
            sort(&tokens, SortDirection::Ascending),
            vec!["apple", "Apple", "banana", "Banana", "cherry"]
        );
        assert_eq!(
            sort(&tokens, SortDirection::Descending),
            vec!["cherry", "Banana", "banana", "Apple", "apple"]
        );
    }

    #[test]
    fn shorter_prefix_sorts_first() {
        assert_eq!(sort(&["abc", "ab", "a"], SortDirection::Ascending), vec!["a", "ab", "abc"]);
    }

    #[test]
    fn toggle_alternates_starting_with_ascending() {
        let mut direction = SortDirection::default();
        let list = vec!["b", "c", "a"];
        let first = sort(&list, direction.toggle());
        assert_eq!(first, vec!["a", "b", "c"]);
        let second = sort(&first, direction.toggle());
        assert_eq!(second, vec!["c", "b", "a"]);
        assert_eq!(direction, SortDirection::Ascending);
        assert_eq!(direction.flipped(), SortDirection::Descending);
    }
}
