// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lossless tokenization and greedy word wrap.

use alloc::string::String;
use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::font::FontDescriptor;
use crate::measure::Measure;

/// Inline token capacity; a typical label fits without allocating.
const INLINE_TOKENS: usize = 32;

/// One token of wrapped text: a run of word characters or a single delimiter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    /// A maximal run of characters that are neither `' '` nor `'\n'`.
    Word(&'a str),
    /// A single `' '`.
    Space,
    /// A single `'\n'`.
    Newline,
}

impl<'a> Token<'a> {
    /// Returns the exact source text of this token.
    #[must_use]
    pub fn as_str(self) -> &'a str {
        match self {
            Self::Word(word) => word,
            Self::Space => " ",
            Self::Newline => "\n",
        }
    }
}

fn is_delimiter(c: char) -> bool {
    c == ' ' || c == '\n'
}

/// Iterator returned by [`tokenize`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let (token, len) = match first {
            ' ' => (Token::Space, 1),
            '\n' => (Token::Newline, 1),
            _ => {
                let len = self.rest.find(is_delimiter).unwrap_or(self.rest.len());
                (Token::Word(&self.rest[..len]), len)
            }
        };
        self.rest = &self.rest[len..];
        Some(token)
    }
}

/// Splits `text` into words and single-character delimiters.
///
/// Concatenating the tokens reproduces `text` exactly.
///
/// ```
/// use trellis_text::{Token, tokenize};
///
/// let tokens: Vec<_> = tokenize("hi  there\n").collect();
/// assert_eq!(
///     tokens,
///     [Token::Word("hi"), Token::Space, Token::Space, Token::Word("there"), Token::Newline]
/// );
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

/// How a wrapped line came to start.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LineStart {
    /// The first line of the text.
    First,
    /// The line follows an explicit `'\n'`.
    Explicit,
    /// The line was started because the previous one ran out of width.
    Wrapped,
}

/// The result of wrapping: lines, how each began, and their widths.
///
/// All three sequences have the same length and `lines()[i]`,
/// `line_starts()[i]`, and `line_widths()[i]` describe the same line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextLayout {
    lines: Vec<String>,
    line_starts: Vec<LineStart>,
    line_widths: Vec<f64>,
}

impl TextLayout {
    /// Returns the text of each line.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the marker each line began with.
    #[must_use]
    pub fn line_starts(&self) -> &[LineStart] {
        &self.line_starts
    }

    /// Returns the measured width of each line.
    #[must_use]
    pub fn line_widths(&self) -> &[f64] {
        &self.line_widths
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there are no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the widest line's width, or `0.0` with no lines.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.line_widths.iter().copied().fold(0.0, f64::max)
    }

    /// Iterates over `(line, width)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.lines
            .iter()
            .map(String::as_str)
            .zip(self.line_widths.iter().copied())
    }

    fn push(&mut self, line: String, start: LineStart, width: f64) {
        self.lines.push(line);
        self.line_starts.push(start);
        self.line_widths.push(width);
    }
}

/// Greedily wraps `text` into lines narrower than `width`.
///
/// - A token joins the current line only while
///   `line_width + token_width < width`; the first token that would reach
///   `width` starts the next line. The first token of a line is always
///   taken, so a word wider than `width` sits alone and overflows.
/// - `'\n'` always ends the line. It is consumed and never measured.
/// - Spaces at the start of a wrapped line are consumed and dropped.
/// - Lines with no content are dropped, so `"a\n\nb"` yields two lines.
/// - Each reported width is the measurement of the whole line's text.
///
/// ```
/// use trellis_text::{FixedAdvance, Font, wrap};
///
/// let font = Font::new("monospace", 12.0).descriptor().unwrap();
/// let layout = wrap("aaaa bbbb", 5.0, &font, &FixedAdvance(4.0));
/// assert_eq!(layout.lines(), ["aaaa", "bbbb"]);
/// assert_eq!(layout.line_widths(), [16.0, 16.0]);
/// ```
pub fn wrap<M>(text: &str, width: f64, font: &FontDescriptor, measure: &M) -> TextLayout
where
    M: Measure + ?Sized,
{
    let tokens: SmallVec<[Token<'_>; INLINE_TOKENS]> = tokenize(text).collect();
    let mut layout = TextLayout::default();
    let mut start = LineStart::First;
    let mut index = 0;

    while index < tokens.len() {
        if start == LineStart::Wrapped {
            while tokens.get(index) == Some(&Token::Space) {
                index += 1;
            }
        }

        let mut line = String::new();
        let mut line_width = 0.0;
        let mut next_start = LineStart::Wrapped;
        while let Some(&token) = tokens.get(index) {
            if token == Token::Newline {
                index += 1;
                next_start = LineStart::Explicit;
                break;
            }
            let token_width = measure.measure(token.as_str(), font);
            if !line.is_empty() && line_width + token_width >= width {
                break;
            }
            line.push_str(token.as_str());
            line_width += token_width;
            index += 1;
        }

        if !line.is_empty() {
            let measured = measure.measure(&line, font);
            layout.push(line, start, measured);
        }
        start = next_start;
    }

    layout
}
