//! Splits pasted text into tokens.
//!
//! A token is a trimmed, non-empty run of text between delimiters, where a
//! delimiter is either a comma or a newline. There is no escaping, so a token
//! can never contain a comma or a newline.
use memchr::memchr2;

/// Returns the tokens of `text` in the order they appear, duplicates and all.
/// Each token is borrowed from `text`. Whitespace around a token (including the
/// `\r` of a `\r\n` line ending) is trimmed, and empty candidates are skipped.
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    Tokens { rest: Some(text) }.collect()
}

/// Iterator behind `tokenize`. `rest` becomes `None` once the final candidate
/// (the text after the last delimiter) has been handed out.
struct Tokens<'data> {
    rest: Option<&'data str>,
}

impl<'data> Iterator for Tokens<'data> {
    type Item = &'data str;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let slice = self.rest?;
            let candidate = match memchr2(b',', b'\n', slice.as_bytes()) {
                Some(end) => {
                    // Both delimiters are ASCII, so `end + 1` is a char boundary
                    self.rest = Some(&slice[end + 1..]);
                    &slice[..end]
                }
                None => {
                    self.rest = None;
                    slice
                }
            };
            let token = candidate.trim();
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn commas_and_newlines_both_separate_tokens() {
        assert_eq!(tokenize("a, b,\nc"), vec!["a", "b", "c"]);
        assert_eq!(tokenize("one\ntwo,three\n"), vec!["one", "two", "three"]);
    }

    #[test]
    fn empty_text_and_bare_delimiters_have_no_tokens() {
        for text in ["", ",,", "\n\n", " , \n ,\t", "\r\n"] {
            assert!(tokenize(text).is_empty(), "for {text:?}");
        }
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        assert_eq!(tokenize("x\r\ny\r\n"), vec!["x", "y"]);
    }

    #[test]
    fn inner_whitespace_is_kept_and_duplicates_survive() {
        assert_eq!(tokenize(" big  dog ,cat,big  dog"), vec!["big  dog", "cat", "big  dog"]);
    }

    #[test]
    fn multibyte_text_is_split_on_char_boundaries() {
        assert_eq!(tokenize("café,naïve\n日本"), vec!["café", "naïve", "日本"]);
    }
}
