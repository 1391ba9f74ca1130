//! Module with the CSS tokenizer.
//!
//! The tokenizer locates rules, at-rules, strings, comments and `url(...)`
//! tokens in a stylesheet without building an AST. All operations are pure
//! functions of `(input, offset, options)`: they consume characters forward
//! only and return the token covering the construct, with child tokens for
//! container constructs. Failing to find a construct at the offset is the
//! routine `Ok(None)` result, not an error.

use std::time::Instant;

use log::trace;

use crate::{
    block::scan_balanced_block,
    comment::scan_block_comment,
    escape::scan_css_escape,
    quoted::scan_any_quoted,
    url::scan_url,
    CssTokenKind, Cursor, Result, ScanError, ScanErrorKind, ScanObserver, ScanOptions, Scanned,
    Span, Token,
};

/// A tokenizer for CSS stylesheets.
///
/// * `'o` represents the lifetime of an optional injected observer.
///
/// The tokenizer itself is stateless between calls; it only carries the scan
/// options and the observer, so it can be reused for any number of inputs and
/// shared across threads.
pub struct CssTokenizer<'o> {
    options: ScanOptions,
    observer: Option<&'o dyn ScanObserver>,
}

impl Default for CssTokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> CssTokenizer<'o> {
    /// Create a tokenizer with default options.
    pub fn new() -> Self {
        CssTokenizer {
            options: ScanOptions::default(),
            observer: None,
        }
    }

    /// Create a tokenizer with the given options.
    pub fn with_options(options: ScanOptions) -> Self {
        CssTokenizer {
            options,
            observer: None,
        }
    }

    /// Attach an observer that receives per-construct timing events.
    pub fn with_observer(mut self, observer: &'o dyn ScanObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The options the tokenizer scans with.
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan a CSS identifier at `at`: runs of `[a-zA-Z0-9_-]` interleaved
    /// with escape sequences.
    pub fn scan_ident(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        loop {
            if let Some(scanned) = self.escape_checked(input, cursor.pos())? {
                cursor.advance_to(scanned.end());
                continue;
            }
            match cursor.peek() {
                Some(c) if c.is_ascii_alphanumeric() || c == '_' || c == '-' => {
                    cursor.bump();
                }
                _ => break,
            }
        }
        if cursor.pos() == at {
            return Ok(None);
        }
        Ok(Some(Token::new(CssTokenKind::Ident, cursor.span_from(at))))
    }

    /// Scan a quoted string at `at`.
    pub fn scan_string(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        match scan_any_quoted(input, at) {
            Some(scanned) => {
                let scanned = self.guard_terminated(scanned, "string")?;
                Ok(Some(Token::new(CssTokenKind::String, scanned.span)))
            }
            None => Ok(None),
        }
    }

    /// Scan a block comment at `at`.
    pub fn scan_comment(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        match scan_block_comment(input, at) {
            Some(scanned) => {
                let scanned = self.guard_terminated(scanned, "comment")?;
                Ok(Some(Token::new(CssTokenKind::Comment, scanned.span)))
            }
            None => Ok(None),
        }
    }

    /// Scan a `url(...)` token at `at`.
    pub fn scan_url(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        match scan_url(input, at) {
            Some(scanned) => {
                let scanned = self.guard_terminated(scanned, "url")?;
                Ok(Some(Token::new(CssTokenKind::Url, scanned.span)))
            }
            None => Ok(None),
        }
    }

    /// Scan a selector list at `at`: everything up to, but not including, the
    /// next unescaped `{` outside of strings and comments.
    ///
    /// Returns `Ok(None)` when no `{` follows the selector text, or the text
    /// is empty.
    pub fn scan_selector_list(
        &self,
        input: &str,
        at: usize,
    ) -> Result<Option<Token<CssTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        loop {
            if let Some(scanned) = scan_block_comment(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "comment")?.end());
                continue;
            }
            if let Some(scanned) = scan_any_quoted(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "string")?.end());
                continue;
            }
            if let Some(scanned) = self.escape_checked(input, cursor.pos())? {
                cursor.advance_to(scanned.end());
                continue;
            }
            match cursor.peek() {
                Some(c) if is_selector_char(c) => {
                    cursor.bump();
                }
                _ => break,
            }
        }
        if cursor.peek() != Some('{') || cursor.pos() == at {
            return Ok(None);
        }
        Ok(Some(Token::new(
            CssTokenKind::SelectorList,
            cursor.span_from(at),
        )))
    }

    /// Scan a declaration list at `at`: the content between a rule's braces.
    ///
    /// Nested balanced blocks (CSS nesting, `@starting-style { ... }` and the
    /// like) are consumed wholesale, so the scan stops only at the unmatched
    /// `}` closing the enclosing rule, or at the end of the input. The list
    /// may be empty; the operation therefore always matches.
    pub fn scan_declaration_list(
        &self,
        input: &str,
        at: usize,
    ) -> Result<Option<Token<CssTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        // An out-of-range offset is clamped by the cursor; the span starts at
        // the clamped position so that start <= end always holds.
        let start = cursor.pos();
        loop {
            if let Some(scanned) = scan_block_comment(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "comment")?.end());
                continue;
            }
            if let Some(scanned) = scan_any_quoted(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "string")?.end());
                continue;
            }
            if let Some(scanned) = scan_url(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "url")?.end());
                continue;
            }
            if let Some(scanned) = self.escape_checked(input, cursor.pos())? {
                cursor.advance_to(scanned.end());
                continue;
            }
            match cursor.peek() {
                None | Some('}') => break,
                Some('{') => {
                    let scanned = scan_balanced_block(input, cursor.pos())
                        .expect("cursor is at an opening brace");
                    cursor.advance_to(self.guard_terminated(scanned, "block")?.end());
                }
                _ => {
                    cursor.bump();
                }
            }
        }
        Ok(Some(Token::new(
            CssTokenKind::DeclarationList,
            cursor.span_from(start),
        )))
    }

    /// Scan a qualified rule at `at`: a selector list immediately followed by
    /// a balanced declaration block.
    ///
    /// The returned token nests the SelectorList and DeclarationList tokens.
    pub fn scan_rule(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        let started = self.observer.map(|_| Instant::now());
        let Some(selectors) = self.scan_selector_list(input, at)? else {
            return Ok(None);
        };
        let block = scan_balanced_block(input, selectors.end())
            .expect("selector list guarantees a following brace");
        let block = self.guard_terminated(block, "rule block")?;
        let declarations = self
            .scan_declaration_list(input, selectors.end() + 1)?
            .expect("declaration lists always match");
        let span = Span::new(at, block.end());
        trace!("rule at {}", span);
        let token = Token::with_nested(CssTokenKind::Rule, span, vec![selectors, declarations]);
        self.observe(CssTokenKind::Rule, span, started);
        Ok(Some(token))
    }

    /// Scan a greedy repetition of rules, comments and whitespace at `at`.
    ///
    /// Returns the collected Rule and Comment tokens; the repetition stops at
    /// the first position where neither matches.
    pub fn scan_rule_list(&self, input: &str, at: usize) -> Result<Vec<Token<CssTokenKind>>> {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(input, at);
        loop {
            cursor.eat_while(|c| c.is_ascii_whitespace());
            if let Some(comment) = self.scan_comment(input, cursor.pos())? {
                cursor.advance_to(comment.end());
                tokens.push(comment);
                continue;
            }
            if let Some(rule) = self.scan_rule(input, cursor.pos())? {
                cursor.advance_to(rule.end());
                tokens.push(rule);
                continue;
            }
            break;
        }
        Ok(tokens)
    }

    /// Scan a statement at-rule at `at`, e.g. `@import url("a.css");`.
    ///
    /// A `{` before the terminating `;` means the at-rule is a nesting
    /// at-rule and this operation returns `Ok(None)`. Reaching the end of the
    /// input before either is tolerated as an implicit terminator.
    pub fn scan_regular_at_rule(
        &self,
        input: &str,
        at: usize,
    ) -> Result<Option<Token<CssTokenKind>>> {
        self.scan_at_rule_filtered(input, at, None, Some(CssTokenKind::RegularAtRule))
    }

    /// Scan a statement at-rule whose keyword equals `name`, compared ASCII
    /// case-insensitively.
    pub fn scan_regular_at_rule_named(
        &self,
        input: &str,
        at: usize,
        name: &str,
    ) -> Result<Option<Token<CssTokenKind>>> {
        self.scan_at_rule_filtered(input, at, Some(name), Some(CssTokenKind::RegularAtRule))
    }

    /// Scan a block at-rule at `at`, e.g. `@media ... { ... }`.
    ///
    /// The block interior is dispatched recursively over rules, at-rules,
    /// comments and declaration lists; the child tokens are nested in the
    /// returned token. A `;` before the opening `{` means the at-rule is a
    /// statement at-rule and this operation returns `Ok(None)`.
    pub fn scan_nesting_at_rule(
        &self,
        input: &str,
        at: usize,
    ) -> Result<Option<Token<CssTokenKind>>> {
        self.scan_at_rule_filtered(input, at, None, Some(CssTokenKind::NestingAtRule))
    }

    /// Scan a block at-rule whose keyword equals `name`, compared ASCII
    /// case-insensitively.
    pub fn scan_nesting_at_rule_named(
        &self,
        input: &str,
        at: usize,
        name: &str,
    ) -> Result<Option<Token<CssTokenKind>>> {
        self.scan_at_rule_filtered(input, at, Some(name), Some(CssTokenKind::NestingAtRule))
    }

    /// Scan an at-rule of either style at `at`.
    ///
    /// The classification follows whichever of `;` and `{` comes first in the
    /// prelude, with comments, strings and urls skipped before either is
    /// looked at.
    pub fn scan_at_rule(&self, input: &str, at: usize) -> Result<Option<Token<CssTokenKind>>> {
        self.scan_at_rule_filtered(input, at, None, None)
    }

    /// Scan a whole stylesheet starting at `at`.
    ///
    /// Top-level rules, at-rules and comments become child tokens of the
    /// returned Stylesheet token. The scan ends at the end of the input, or
    /// at the first position where no construct matches; the stylesheet span
    /// covers everything consumed.
    pub fn scan_stylesheet(&self, input: &str, at: usize) -> Result<Token<CssTokenKind>> {
        let started = self.observer.map(|_| Instant::now());
        let mut nested = Vec::new();
        let mut cursor = Cursor::new(input, at);
        let start = cursor.pos();
        loop {
            cursor.eat_while(|c| c.is_ascii_whitespace());
            if cursor.at_eof() {
                break;
            }
            if let Some(comment) = self.scan_comment(input, cursor.pos())? {
                cursor.advance_to(comment.end());
                nested.push(comment);
                continue;
            }
            if cursor.peek() == Some('@') {
                if let Some(at_rule) = self.scan_at_rule(input, cursor.pos())? {
                    cursor.advance_to(at_rule.end());
                    nested.push(at_rule);
                    continue;
                }
                break;
            }
            if let Some(rule) = self.scan_rule(input, cursor.pos())? {
                cursor.advance_to(rule.end());
                nested.push(rule);
                continue;
            }
            break;
        }
        let span = cursor.span_from(start);
        trace!("stylesheet at {} with {} children", span, nested.len());
        self.observe(CssTokenKind::Stylesheet, span, started);
        Ok(Token::with_nested(CssTokenKind::Stylesheet, span, nested))
    }

    fn scan_at_rule_filtered(
        &self,
        input: &str,
        at: usize,
        name: Option<&str>,
        kind: Option<CssTokenKind>,
    ) -> Result<Option<Token<CssTokenKind>>> {
        let Some(token) = self.scan_any_at_rule(input, at, name)? else {
            return Ok(None);
        };
        match kind {
            Some(kind) if token.kind() != kind => Ok(None),
            _ => Ok(Some(token)),
        }
    }

    /// Scan an at-rule and classify it by its terminator.
    fn scan_any_at_rule(
        &self,
        input: &str,
        at: usize,
        name: Option<&str>,
    ) -> Result<Option<Token<CssTokenKind>>> {
        let started = self.observer.map(|_| Instant::now());
        let mut cursor = Cursor::new(input, at);
        if !cursor.eat_char('@') {
            return Ok(None);
        }
        let keyword = cursor.eat_while(|c| c.is_ascii_alphabetic() || c == '-');
        if keyword.is_empty() {
            return Ok(None);
        }
        if let Some(name) = name {
            if !keyword.text(input).eq_ignore_ascii_case(name) {
                return Ok(None);
            }
        }
        // Prelude: everything up to the classifying `;` or `{`.
        loop {
            if let Some(scanned) = scan_block_comment(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "comment")?.end());
                continue;
            }
            if let Some(scanned) = scan_any_quoted(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "string")?.end());
                continue;
            }
            if let Some(scanned) = scan_url(input, cursor.pos()) {
                cursor.advance_to(self.guard_terminated(scanned, "url")?.end());
                continue;
            }
            if let Some(scanned) = self.escape_checked(input, cursor.pos())? {
                cursor.advance_to(scanned.end());
                continue;
            }
            match cursor.peek() {
                None => {
                    // Tolerated as a statement at-rule closed at end of input.
                    if !self.options.tolerate_unterminated {
                        return Err(ScanError::unterminated("at-rule", at));
                    }
                    let span = cursor.span_from(at);
                    self.observe(CssTokenKind::RegularAtRule, span, started);
                    return Ok(Some(Token::new(CssTokenKind::RegularAtRule, span)));
                }
                Some(';') => {
                    cursor.bump();
                    let span = cursor.span_from(at);
                    trace!("regular at-rule at {}", span);
                    self.observe(CssTokenKind::RegularAtRule, span, started);
                    return Ok(Some(Token::new(CssTokenKind::RegularAtRule, span)));
                }
                Some('{') => break,
                // A `}` or a second `@` in the prelude means this is not a
                // well-formed at-rule at all.
                Some('}') | Some('@') => return Ok(None),
                Some(_) => {
                    cursor.bump();
                }
            }
        }
        cursor.bump();
        let nested = self.scan_at_rule_body(input, &mut cursor, at)?;
        let span = cursor.span_from(at);
        trace!("nesting at-rule at {} with {} children", span, nested.len());
        self.observe(CssTokenKind::NestingAtRule, span, started);
        Ok(Some(Token::with_nested(
            CssTokenKind::NestingAtRule,
            span,
            nested,
        )))
    }

    /// Scan the interior of a nesting at-rule up to and including the closing
    /// brace. The cursor is positioned right after the opening brace.
    fn scan_at_rule_body(
        &self,
        input: &str,
        cursor: &mut Cursor<'_>,
        rule_start: usize,
    ) -> Result<Vec<Token<CssTokenKind>>> {
        let mut nested = Vec::new();
        loop {
            cursor.eat_while(|c| c.is_ascii_whitespace());
            match cursor.peek() {
                None => {
                    if !self.options.tolerate_unterminated {
                        return Err(ScanError::unterminated("at-rule block", rule_start));
                    }
                    return Ok(nested);
                }
                Some('}') => {
                    cursor.bump();
                    return Ok(nested);
                }
                _ => {}
            }
            if let Some(comment) = self.scan_comment(input, cursor.pos())? {
                cursor.advance_to(comment.end());
                nested.push(comment);
                continue;
            }
            if cursor.peek() == Some('@') {
                if let Some(at_rule) = self.scan_at_rule(input, cursor.pos())? {
                    cursor.advance_to(at_rule.end());
                    nested.push(at_rule);
                    continue;
                }
            }
            if let Some(rule) = self.scan_rule(input, cursor.pos())? {
                cursor.advance_to(rule.end());
                nested.push(rule);
                continue;
            }
            // Plain declarations, e.g. the body of `@font-face` or `@page`.
            let declarations = self
                .scan_declaration_list(input, cursor.pos())?
                .expect("declaration lists always match");
            debug_assert!(
                !declarations.span().is_empty(),
                "declaration fallback must make progress"
            );
            cursor.advance_to(declarations.end());
            nested.push(declarations);
        }
    }

    /// Scan an escape sequence, applying the strict validation policy.
    fn escape_checked(&self, input: &str, at: usize) -> Result<Option<Scanned>> {
        match scan_css_escape(input, at) {
            Some(scanned) if scanned.terminated => Ok(Some(scanned)),
            Some(scanned) => {
                if self.options.strict_escape_validation {
                    Err(ScanError::new(ScanErrorKind::InvalidEscapeSequence, at))
                } else {
                    Ok(Some(scanned))
                }
            }
            None => {
                if self.options.strict_escape_validation && input[at..].starts_with('\\') {
                    Err(ScanError::new(ScanErrorKind::InvalidEscapeSequence, at))
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn guard_terminated(&self, scanned: Scanned, construct: &'static str) -> Result<Scanned> {
        if !scanned.terminated && !self.options.tolerate_unterminated {
            Err(ScanError::unterminated(construct, scanned.span.start))
        } else {
            Ok(scanned)
        }
    }

    fn observe(&self, kind: CssTokenKind, span: Span, started: Option<Instant>) {
        if let (Some(observer), Some(started)) = (self.observer, started) {
            observer.construct_scanned(kind.name(), span, started.elapsed());
        }
    }
}

/// The characters a selector list may consist of, besides comments, strings
/// and escape sequences.
fn is_selector_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_ascii_whitespace()
        || matches!(
            c,
            '_' | ':' | '.' | '#' | '*' | ',' | '>' | '+' | '~' | '^' | '$' | '='
                | '|' | '(' | ')' | '[' | ']' | '-' | '&' | '%'
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_simple_rule() {
        init();
        let input = "p{color:red;}";
        let tokenizer = CssTokenizer::new();
        let rule = tokenizer.scan_rule(input, 0).unwrap().unwrap();
        assert_eq!(rule.text(input), input);
        assert_eq!(rule.nested()[0].text(input), "p");
        assert_eq!(rule.nested()[1].text(input), "color:red;");
    }

    #[test]
    fn test_ident_with_escape() {
        let input = r"\31 234{display:block;}";
        let tokenizer = CssTokenizer::new();
        let ident = tokenizer.scan_ident(input, 0).unwrap().unwrap();
        assert_eq!(ident.text(input), r"\31 234");
    }

    #[test]
    fn test_ident_no_match() {
        let tokenizer = CssTokenizer::new();
        assert!(tokenizer.scan_ident("{}", 0).unwrap().is_none());
    }

    #[test]
    fn test_strict_escape_validation() {
        let tokenizer =
            CssTokenizer::with_options(ScanOptions::new().strict_escape_validation(true));
        let err = tokenizer.scan_ident("abc\\", 0).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::InvalidEscapeSequence);
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn test_strict_unterminated_string() {
        let tokenizer =
            CssTokenizer::with_options(ScanOptions::new().tolerate_unterminated(false));
        let err = tokenizer.scan_string("\"open", 0).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::UnterminatedConstruct("string"));
    }

    #[test]
    fn test_nesting_at_rule_with_one_rule() {
        let input = "@media (min-width:1px){p{color:red;}}";
        let tokenizer = CssTokenizer::new();
        let at_rule = tokenizer.scan_nesting_at_rule(input, 0).unwrap().unwrap();
        assert_eq!(at_rule.text(input), input);
        let rules: Vec<_> = at_rule
            .nested()
            .iter()
            .filter(|t| t.kind() == CssTokenKind::Rule)
            .collect();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].text(input), "p{color:red;}");
    }

    #[test]
    fn test_at_rule_classification() {
        let tokenizer = CssTokenizer::new();
        let import = "@import url(\"bluish.css\") print, screen;";
        let token = tokenizer.scan_at_rule(import, 0).unwrap().unwrap();
        assert_eq!(token.kind(), CssTokenKind::RegularAtRule);
        // The same input must not scan as a nesting at-rule.
        assert!(tokenizer.scan_nesting_at_rule(import, 0).unwrap().is_none());

        let media = "@media print{}";
        let token = tokenizer.scan_at_rule(media, 0).unwrap().unwrap();
        assert_eq!(token.kind(), CssTokenKind::NestingAtRule);
        assert!(tokenizer.scan_regular_at_rule(media, 0).unwrap().is_none());
    }

    #[test]
    fn test_named_at_rule_filter() {
        let input = "@starting-style {opacity: 0;}";
        let tokenizer = CssTokenizer::new();
        assert!(tokenizer
            .scan_nesting_at_rule_named(input, 0, "starting-style")
            .unwrap()
            .is_some());
        assert!(tokenizer
            .scan_nesting_at_rule_named(input, 0, "media")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_rescan_determinism() {
        let input = "@supports (display: flex){@media screen{article{display:flex;}}}";
        let tokenizer = CssTokenizer::new();
        let first = tokenizer.scan_at_rule(input, 0).unwrap().unwrap();
        let second = tokenizer
            .scan_at_rule(input, first.start())
            .unwrap()
            .unwrap();
        assert_eq!(first, second);
    }
}
