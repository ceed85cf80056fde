//! Terminal styling. A `StyleSheet` says how each part of the output looks;
//! `StyleSheet::for_choice` picks a colored or a plain one.
use anstyle::{AnsiColor, Color, RgbColor, Style};
use clap::ValueEnum;
use once_cell::sync::Lazy;
use std::fmt;

use crate::dedupe::DUPLICATE_PALETTE;

/// When to use color
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Color if standard output is a terminal that supports it
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

/// The styles for each part of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSheet {
    enabled: bool,
    heading: Style,
    count: Style,
    key: Style,
    string: Style,
    number: Style,
    literal: Style,
    punctuation: Style,
    error: Style,
}

const fn fg(color: AnsiColor) -> Style {
    Style::new().fg_color(Some(Color::Ansi(color)))
}

const COLORED: StyleSheet = StyleSheet {
    enabled: true,
    heading: fg(AnsiColor::Yellow).bold(),
    count: fg(AnsiColor::Cyan),
    key: fg(AnsiColor::Blue),
    string: fg(AnsiColor::Green),
    number: fg(AnsiColor::Magenta),
    literal: fg(AnsiColor::Red),
    punctuation: Style::new().dimmed(),
    error: fg(AnsiColor::Red).bold(),
};

const PLAIN: StyleSheet = StyleSheet {
    enabled: false,
    heading: Style::new(),
    count: Style::new(),
    key: Style::new(),
    string: Style::new(),
    number: Style::new(),
    literal: Style::new(),
    punctuation: Style::new(),
    error: Style::new(),
};

static AUTO: Lazy<bool> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some()
});

impl StyleSheet {
    /// The style sheet to use for `choice`
    #[must_use]
    pub fn for_choice(choice: ColorChoice) -> Self {
        let colored = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => *AUTO,
        };
        tracing::trace!(?choice, colored, "chose style sheet");
        if colored {
            COLORED
        } else {
            PLAIN
        }
    }

    /// Section titles
    #[must_use]
    pub fn heading<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.heading, content }
    }
    /// Item counts
    #[must_use]
    pub fn count<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.count, content }
    }
    /// Object keys and array indexes
    #[must_use]
    pub fn key<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.key, content }
    }
    /// JSON strings
    #[must_use]
    pub fn string<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.string, content }
    }
    /// JSON numbers
    #[must_use]
    pub fn number<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.number, content }
    }
    /// `true`, `false` and `null`
    #[must_use]
    pub fn literal<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.literal, content }
    }
    /// Brackets, braces and toggles
    #[must_use]
    pub fn punctuation<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.punctuation, content }
    }
    /// Error messages
    #[must_use]
    pub fn error<'a>(&self, content: &'a str) -> Styled<'a> {
        Styled { style: self.error, content }
    }

    /// A token from duplicate group `color`, on that group's background
    #[must_use]
    pub fn duplicate<'a>(&self, content: &'a str, color: usize) -> Styled<'a> {
        if !self.enabled {
            return Styled { style: Style::new(), content };
        }
        let hex = DUPLICATE_PALETTE[color % DUPLICATE_PALETTE.len()];
        let style = match rgb(hex) {
            Some(bg) => fg(AnsiColor::Black).bg_color(Some(Color::Rgb(bg))),
            None => Style::new().invert(),
        };
        Styled { style, content }
    }
}

/// Parses `#rrggbb`
fn rgb(hex: &str) -> Option<RgbColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RgbColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Text to be written with a style
pub struct Styled<'a> {
    style: Style,
    content: &'a str,
}

impl fmt::Display for Styled<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.style.render(), self.content, self.style.render_reset())
    }
}
