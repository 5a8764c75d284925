//! Line splitter for the block segmenter.
//!
//! The lexer splits input into lines using `memchr` for newline detection
//! (SIMD on supported platforms). Lines borrow directly from the input.
//!
//! Splitting follows `str::split('\n')`: empty input produces a single empty
//! line and a trailing newline produces a final empty line. A `\r` left at
//! the end of a line by CRLF input is dropped from [`Line::text`] but kept in
//! [`Line::raw`].

use memchr::memchr;

/// A single line from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text (without trailing newline or `\r`).
    pub text: &'a str,
    /// The line exactly as it appears in the input, minus the `\n`.
    pub raw: &'a str,
    /// 1-based line number in the input.
    pub number: usize,
}

impl<'a> Line<'a> {
    /// Check if this line contains only whitespace.
    #[inline(always)]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// Get the line text with leading/trailing whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        self.text.trim()
    }
}

/// Line iterator over an input string.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Current byte offset.
    offset: usize,
    /// Number of lines produced so far.
    line: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            line: 0,
            done: false,
        }
    }

    /// Number of lines consumed so far.
    #[inline(always)]
    pub fn lines_read(&self) -> usize {
        self.line
    }

    /// Read the next line from input.
    #[inline(always)]
    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.done {
            return None;
        }

        let start = self.offset;

        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => {
                // Last segment, possibly empty.
                self.done = true;
                self.bytes.len()
            }
        };

        let text_end = if end > start && self.bytes[end - 1] == b'\r' {
            end - 1
        } else {
            end
        };

        self.offset = end + 1;
        self.line += 1;

        // `start` and `text_end` sit next to ASCII `\n`/`\r` or at the input
        // bounds, so both are char boundaries.
        Some(Line {
            text: &self.input[start..text_end],
            raw: &self.input[start..end],
            number: self.line,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.read_line()
    }
}
