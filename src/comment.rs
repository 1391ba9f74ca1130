//! Module with the comment scanners for block (`/* ... */`) and line
//! (`// ...`) comments.

use crate::{Cursor, Scanned};

/// Scan a block comment at `at`.
///
/// The comment runs from `/*` to the first following `*/`; stray `*`
/// characters inside are no terminators. A comment that is never closed is
/// taken to the end of the input with `terminated == false`.
pub fn scan_block_comment(input: &str, at: usize) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_str("/*") {
        return None;
    }
    while !cursor.at_eof() {
        if cursor.eat_str("*/") {
            return Some(Scanned::new(cursor.span_from(at), true));
        }
        cursor.bump();
    }
    Some(Scanned::new(cursor.span_from(at), false))
}

/// Scan a line comment at `at`.
///
/// The comment runs from `//` to the end of the line. The line terminator is
/// not part of the comment. Line comments are always terminated; the end of
/// the input ends them like a line break does.
pub fn scan_line_comment(input: &str, at: usize) -> Option<Scanned> {
    let mut cursor = Cursor::new(input, at);
    if !cursor.eat_str("//") {
        return None;
    }
    cursor.eat_while(|c| c != '\r' && c != '\n');
    Some(Scanned::new(cursor.span_from(at), true))
}

/// Scan either kind of comment at `at`.
pub fn scan_comment(input: &str, at: usize) -> Option<Scanned> {
    scan_block_comment(input, at).or_else(|| scan_line_comment(input, at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_comment() {
        let input = "/* comment */ rest";
        let scanned = scan_block_comment(input, 0).unwrap();
        assert!(scanned.terminated);
        assert_eq!(scanned.span.text(input), "/* comment */");
    }

    #[test]
    fn test_block_comment_with_asterisks() {
        let input = "/* comment ** comment */";
        let scanned = scan_block_comment(input, 0).unwrap();
        assert_eq!(scanned.span.text(input), input);
    }

    #[test]
    fn test_multiline_block_comment() {
        let input = "/*\n comment\n comment\n */";
        let scanned = scan_block_comment(input, 0).unwrap();
        assert_eq!(scanned.span.text(input), input);
    }

    #[test]
    fn test_empty_block_comment() {
        let scanned = scan_block_comment("/**/", 0).unwrap();
        assert!(scanned.terminated);
        assert_eq!(scanned.span.len(), 4);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let input = "/* never closed";
        let scanned = scan_block_comment(input, 0).unwrap();
        assert!(!scanned.terminated);
        assert_eq!(scanned.span.text(input), input);
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let input = "// line comment\n2nd line";
        let scanned = scan_line_comment(input, 0).unwrap();
        assert_eq!(scanned.span.text(input), "// line comment");
    }

    #[test]
    fn test_line_comment_at_eof() {
        let input = "// line comment";
        let scanned = scan_line_comment(input, 0).unwrap();
        assert!(scanned.terminated);
        assert_eq!(scanned.span.text(input), input);
    }

    #[test]
    fn test_no_match() {
        assert_eq!(scan_block_comment("/x", 0), None);
        assert_eq!(scan_line_comment("/x", 0), None);
        assert_eq!(scan_comment("x", 0), None);
    }

    #[test]
    fn test_comment_dispatch() {
        let input = "// line";
        let scanned = scan_comment(input, 0).unwrap();
        assert_eq!(scanned.span.text(input), "// line");
    }
}
