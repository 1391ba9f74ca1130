//! Module with the quoted string scanners.
//!
//! A string starts at one of the delimiters `"`, `'` or `` ` `` and runs to
//! the next unescaped occurrence of the same delimiter. A backslash escapes
//! any following character, including the delimiter and a backslash itself;
//! newlines are embedded literally. A string that is never closed is taken to
//! the end of the input with `terminated == false`.

use crate::{Cursor, Scanned};

/// Scan a double quoted string at `at`.
pub fn scan_double_quoted(input: &str, at: usize) -> Option<Scanned> {
    scan_quoted(input, at, '"')
}

/// Scan a single quoted string at `at`.
pub fn scan_single_quoted(input: &str, at: usize) -> Option<Scanned> {
    scan_quoted(input, at, '\'')
}

/// Scan a back tick quoted string at `at`.
pub fn scan_back_tick(input: &str, at: usize) -> Option<Scanned> {
    scan_quoted(input, at, '`')
}

/// Scan a string quoted with any of the three delimiters at `at`.
/// The delimiter found at the offset decides which string is scanned.
pub fn scan_any_quoted(input: &str, at: usize) -> Option<Scanned> {
    match Cursor::new(input, at).peek()? {
        '"' => scan_double_quoted(input, at),
        '\'' => scan_single_quoted(input, at),
        '`' => scan_back_tick(input, at),
        _ => None,
    }
}

fn scan_quoted(input: &str, at: usize, delimiter: char) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_char(delimiter) {
        return None;
    }
    while let Some(c) = cursor.bump() {
        if c == delimiter {
            return Some(Scanned::new(cursor.span_from(at), true));
        }
        if c == '\\' {
            // The escaped character is consumed blindly; if the backslash is
            // the last character of the input the loop simply ends.
            cursor.bump();
        }
    }
    Some(Scanned::new(cursor.span_from(at), false))
}
