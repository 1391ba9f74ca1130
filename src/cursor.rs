//! Module with the cursor type used by all scanners.
//! A cursor is a byte position into a borrowed input buffer that only ever
//! moves forward, staying on UTF-8 character boundaries.

use crate::Span;

/// A forward-only cursor over the scanned input.
///
/// * `'h` represents the lifetime of the haystack being scanned.
#[derive(Debug, Clone)]
pub struct Cursor<'h> {
    input: &'h str,
    pos: usize,
}

impl<'h> Cursor<'h> {
    /// Create a new cursor at the given byte offset.
    ///
    /// Offsets past the end of the input are clamped to the input length, and
    /// an offset inside a multi-byte character is rounded forward to the next
    /// character boundary, so a cursor is always in a valid state rather than
    /// a panic.
    pub fn new(input: &'h str, at: usize) -> Self {
        let mut pos = at.min(input.len());
        while !input.is_char_boundary(pos) {
            pos += 1;
        }
        Cursor { input, pos }
    }

    /// The current byte offset.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// The input the cursor scans.
    #[inline]
    pub fn input(&self) -> &'h str {
        self.input
    }

    /// Check whether the cursor reached the end of the input.
    #[inline]
    pub fn at_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The yet unscanned rest of the input.
    #[inline]
    pub fn rest(&self) -> &'h str {
        &self.input[self.pos..]
    }

    /// Look at the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look at the character after the next one without consuming anything.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    /// Consume the next character and return it.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume the next character if it equals `expected`.
    pub fn eat_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume `prefix` if the rest of the input starts with it.
    pub fn eat_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Consume `prefix` if the rest of the input starts with it, compared
    /// ASCII case-insensitively. `prefix` must be ASCII.
    pub fn eat_str_ignore_ascii_case(&mut self, prefix: &str) -> bool {
        debug_assert!(prefix.is_ascii());
        let rest = self.rest().as_bytes();
        let prefix = prefix.as_bytes();
        // A case-insensitive ASCII match only covers ASCII bytes, so advancing
        // by the prefix length stays on a character boundary.
        if rest.len() >= prefix.len() && rest[..prefix.len()].eq_ignore_ascii_case(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    /// Check whether the rest of the input starts with `prefix`.
    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Consume characters while `pred` holds and return the consumed span.
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> Span {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        Span::new(start, self.pos)
    }

    /// Move the cursor to the given byte offset. The offset must not lie
    /// before the current position; scanning never backtracks.
    pub fn advance_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.pos, "cursor must not move backwards");
        self.pos = pos.min(self.input.len());
    }

    /// The span from `start` up to the current position.
    #[inline]
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.pos)
    }
}
