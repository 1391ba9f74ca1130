//! Module with the scanner for CSS `url(...)` tokens.

use crate::{escape::scan_css_escape, quoted::scan_any_quoted, Cursor, Scanned};

/// Scan a `url(...)` token at `at`.
///
/// The keyword is matched ASCII case-insensitively. The value is either a
/// quoted string or an unquoted run of characters; escape sequences are
/// scanned over, and a `)` inside a quoted value does not close the token.
/// An unterminated url is taken to the end of the input.
pub fn scan_url(input: &str, at: usize) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_str_ignore_ascii_case("url(") {
        return None;
    }
    while let Some(c) = cursor.peek() {
        if c == ')' {
            cursor.bump();
            return Some(Scanned::new(cursor.span_from(at), true));
        }
        if let Some(scanned) = scan_any_quoted(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        if let Some(scanned) = scan_css_escape(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        cursor.bump();
    }
    Some(Scanned::new(cursor.span_from(at), false))
}
