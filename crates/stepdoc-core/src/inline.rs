//! Single-layer inline tokenizer.
//!
//! Greedy, left-to-right scanning with `memchr` jumps between delimiter
//! candidates. At each candidate position the forms are tried in a fixed
//! order: code span, `**bold**`, `*italic*`, `__bold__`, `[link](url)`.
//! Matched content is never scanned again, so formatting does not nest.
//! A delimiter without a valid closer stays in the surrounding text.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

use crate::ast::Span;

const DOUBLE_DASH: &str = " -- ";
const EM_DASH: &str = " \u{2014} ";

/// Convert one line of text into inline spans.
///
/// Every ` -- ` is replaced by a spaced em dash (U+2014) first. Spans borrow
/// from `text` unless that replacement happened, in which case they are owned.
///
/// # Example
///
/// ```rust
/// use stepdoc_core::{inline, Span};
///
/// let spans = inline("run `make` first");
/// assert_eq!(spans.len(), 3);
/// assert!(matches!(&spans[1], Span::Code(c) if c == "make"));
/// ```
#[inline]
pub fn inline(text: &str) -> Vec<Span<'_>> {
    if text.is_empty() {
        return Vec::new();
    }

    if text.contains(DOUBLE_DASH) {
        let replaced = text.replace(DOUBLE_DASH, EM_DASH);
        let owned: Vec<Span<'static>> = InlineParser::new(&replaced)
            .parse()
            .into_iter()
            .map(Span::into_owned)
            .collect();
        return owned;
    }

    InlineParser::new(text).parse()
}

struct InlineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    /// Start of the pending plain-text run.
    text_start: usize,
    spans: Vec<Span<'a>>,
}

impl<'a> InlineParser<'a> {
    #[inline]
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            text_start: 0,
            spans: Vec::with_capacity(8),
        }
    }

    fn parse(mut self) -> Vec<Span<'a>> {
        while self.pos < self.bytes.len() {
            let next_special = self.find_next_special();

            if next_special >= self.bytes.len() {
                break;
            }

            self.pos = next_special;

            let parsed = match self.bytes[self.pos] {
                b'`' => self.try_parse_code(),
                b'*' => self.try_parse_strong_star() || self.try_parse_emphasis(),
                b'_' => self.try_parse_strong_underscore(),
                b'[' => self.try_parse_link(),
                _ => false,
            };

            if !parsed {
                self.pos += 1;
            }
        }

        if self.text_start < self.bytes.len() {
            let rest = self.slice(self.text_start, self.bytes.len());
            self.spans.push(Span::Text(Cow::Borrowed(rest)));
        }

        self.spans
    }

    #[inline(always)]
    fn find_next_special(&self) -> usize {
        let remaining = &self.bytes[self.pos..];

        let common = memchr3(b'*', b'`', b'[', remaining);
        let rare = memchr(b'_', remaining);

        match (common, rare) {
            (Some(a), Some(b)) => self.pos + a.min(b),
            (Some(a), None) => self.pos + a,
            (None, Some(b)) => self.pos + b,
            (None, None) => self.bytes.len(),
        }
    }

    /// Emit pending plain text, then `span`, and resume after `end`.
    #[inline(always)]
    fn emit(&mut self, span: Span<'a>, end: usize) {
        if self.text_start < self.pos {
            let pending = self.slice(self.text_start, self.pos);
            self.spans.push(Span::Text(Cow::Borrowed(pending)));
        }
        self.spans.push(span);
        self.pos = end;
        self.text_start = end;
    }

    #[inline(always)]
    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    /// Position of the first `needle` at or after `from`.
    #[inline(always)]
    fn find(&self, needle: u8, from: usize) -> Option<usize> {
        if from >= self.bytes.len() {
            return None;
        }
        memchr(needle, &self.bytes[from..]).map(|offset| from + offset)
    }

    /// `` `code` `` with at least one character and no inner backtick.
    #[inline]
    fn try_parse_code(&mut self) -> bool {
        let content_start = self.pos + 1;
        match self.find(b'`', content_start) {
            Some(close) if close > content_start => {
                let content = self.slice(content_start, close);
                self.emit(Span::Code(Cow::Borrowed(content)), close + 1);
                true
            }
            _ => false,
        }
    }

    /// `**bold**`: the first `*` after the opener must begin the closer.
    #[inline]
    fn try_parse_strong_star(&mut self) -> bool {
        self.try_parse_strong(b'*')
    }

    /// `__bold__`: the first `_` after the opener must begin the closer.
    #[inline]
    fn try_parse_strong_underscore(&mut self) -> bool {
        self.try_parse_strong(b'_')
    }

    #[inline]
    fn try_parse_strong(&mut self, marker: u8) -> bool {
        if self.bytes.get(self.pos + 1) != Some(&marker) {
            return false;
        }

        let content_start = self.pos + 2;
        match self.find(marker, content_start) {
            Some(close)
                if close > content_start && self.bytes.get(close + 1) == Some(&marker) =>
            {
                let content = self.slice(content_start, close);
                self.emit(Span::Bold(Cow::Borrowed(content)), close + 2);
                true
            }
            _ => false,
        }
    }

    /// `*italic*` with at least one character and no inner `*`.
    #[inline]
    fn try_parse_emphasis(&mut self) -> bool {
        let content_start = self.pos + 1;
        match self.find(b'*', content_start) {
            Some(close) if close > content_start => {
                let content = self.slice(content_start, close);
                self.emit(Span::Italic(Cow::Borrowed(content)), close + 1);
                true
            }
            _ => false,
        }
    }

    /// `[text](url)`: text has no `]`, url has no `)`, neither is empty.
    #[inline]
    fn try_parse_link(&mut self) -> bool {
        let label_start = self.pos + 1;
        let label_end = match self.find(b']', label_start) {
            Some(end) if end > label_start => end,
            _ => return false,
        };

        if self.bytes.get(label_end + 1) != Some(&b'(') {
            return false;
        }

        let url_start = label_end + 2;
        match self.find(b')', url_start) {
            Some(url_end) if url_end > url_start => {
                let span = Span::Link {
                    text: Cow::Borrowed(self.slice(label_start, label_end)),
                    url: Cow::Borrowed(self.slice(url_start, url_end)),
                };
                self.emit(span, url_end + 1);
                true
            }
            _ => false,
        }
    }
}
