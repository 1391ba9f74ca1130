//! Module with the CSS escape sequence scanner.
//!
//! CSS knows two escape forms: a backslash followed by one to six hexadecimal
//! digits and at most one trailing whitespace character, and a backslash
//! followed by exactly one character that is neither a hex digit nor a
//! newline. Every CSS scanner uses this to treat escaped delimiters like
//! `\{`, `\"` or `\:` as non-structural text.

use crate::{Cursor, Scanned};

/// Scan a CSS escape sequence at `at`.
///
/// Returns `None` when the offset is not at a backslash or the backslash
/// precedes a newline, which is not a valid escape. A backslash at the very
/// end of the input is scanned as an unterminated escape.
pub fn scan_css_escape(input: &str, at: usize) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_char('\\') {
        return None;
    }
    let Some(c) = cursor.peek() else {
        return Some(Scanned::new(cursor.span_from(at), false));
    };
    if c.is_ascii_hexdigit() {
        let mut digits = 0;
        while digits < 6 {
            match cursor.peek() {
                Some(d) if d.is_ascii_hexdigit() => {
                    cursor.bump();
                    digits += 1;
                }
                _ => break,
            }
        }
        // One whitespace character terminates the hex form and belongs to the
        // escape; a CRLF pair counts as a single terminator.
        if cursor.starts_with("\r\n") {
            cursor.advance_to(cursor.pos() + 2);
        } else if matches!(cursor.peek(), Some(' ' | '\t' | '\r' | '\n' | '\u{c}')) {
            cursor.bump();
        }
        return Some(Scanned::new(cursor.span_from(at), true));
    }
    if c == '\r' || c == '\n' {
        return None;
    }
    cursor.bump();
    Some(Scanned::new(cursor.span_from(at), true))
}
