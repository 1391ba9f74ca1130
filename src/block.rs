//! Module with the balanced block scanner.
//!
//! The scanner matches a `{` to its closing `}` with an explicit depth
//! counter. Braces inside strings, comments, `url(...)` tokens and escape
//! sequences are not structural and do not change the depth; those constructs
//! are scanned over wholesale before brace counting resumes.

use crate::{
    comment::scan_block_comment, escape::scan_css_escape, quoted::scan_any_quoted, url::scan_url,
    Cursor, Scanned,
};

/// Scan a balanced `{ ... }` block at `at`.
///
/// Returns `None` when the offset is not at a `{`. A block whose closing
/// brace is missing is taken to the end of the input with
/// `terminated == false`.
///
/// Every loop iteration consumes at least one character, so the scan
/// terminates after at most one pass over the input.
pub fn scan_balanced_block(input: &str, at: usize) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_char('{') {
        return None;
    }
    let mut depth = 1usize;
    while let Some(c) = cursor.peek() {
        if let Some(scanned) = scan_block_comment(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        if let Some(scanned) = scan_any_quoted(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        if let Some(scanned) = scan_url(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        if let Some(scanned) = scan_css_escape(input, cursor.pos()) {
            cursor.advance_to(scanned.end());
            continue;
        }
        cursor.bump();
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(Scanned::new(cursor.span_from(at), true));
                }
            }
            _ => {}
        }
    }
    Some(Scanned::new(cursor.span_from(at), false))
}
