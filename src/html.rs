//! Module with the HTML tokenizer.
//!
//! The tokenizer locates comments, tags, attributes and whole elements in
//! HTML-like markup without building a DOM. Matching an end tag to the start
//! tag that opened it is done by capturing the start tag's name and comparing
//! it against every candidate end tag during the forward scan. Tag and
//! attribute name comparisons are ASCII case-insensitive.

use std::time::Instant;

use log::trace;

use crate::{
    quoted::scan_any_quoted, Cursor, HtmlTokenKind, Result, ScanError, ScanErrorKind,
    ScanObserver, ScanOptions, Scanned, Span, Token,
};

/// A start tag together with the data the element scanners need: the span of
/// the tag name and whether the tag closed itself with `/>`.
struct StartTag {
    token: Token<HtmlTokenKind>,
    name: Span,
    self_closing: bool,
}

/// A tokenizer for HTML-like markup.
///
/// * `'o` represents the lifetime of an optional injected observer.
///
/// Like the CSS tokenizer it is stateless between calls and can be shared
/// freely; each scan is a pure function of input, offset and options.
pub struct HtmlTokenizer<'o> {
    options: ScanOptions,
    observer: Option<&'o dyn ScanObserver>,
}

impl Default for HtmlTokenizer<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'o> HtmlTokenizer<'o> {
    /// Create a tokenizer with default options.
    pub fn new() -> Self {
        HtmlTokenizer {
            options: ScanOptions::default(),
            observer: None,
        }
    }

    /// Create a tokenizer with the given options.
    ///
    /// Fails fast with [`ScanErrorKind::InvalidConfiguration`] when the void
    /// element set is empty; the element scanners rely on it to decide which
    /// tags cannot have an end tag.
    pub fn with_options(options: ScanOptions) -> Result<Self> {
        if options.void_elements.is_empty() {
            return Err(ScanError::new(
                ScanErrorKind::InvalidConfiguration("the void element set must not be empty".into()),
                0,
            ));
        }
        Ok(HtmlTokenizer {
            options,
            observer: None,
        })
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

    /// Scan an HTML comment at `at`: `<!--` up to the earliest `-->`, also
    /// accepting the malformed close `--!>`. An unclosed comment is taken to
    /// the end of the input.
    pub fn scan_comment(&self, input: &str, at: usize) -> Result<Option<Token<HtmlTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        if !cursor.eat_str("<!--") {
            return Ok(None);
        }
        loop {
            if cursor.eat_str("-->") || cursor.eat_str("--!>") {
                return Ok(Some(Token::new(
                    HtmlTokenKind::Comment,
                    cursor.span_from(at),
                )));
            }
            if cursor.bump().is_none() {
                let scanned = Scanned::new(cursor.span_from(at), false);
                let scanned = self.guard_terminated(scanned, "comment")?;
                return Ok(Some(Token::new(HtmlTokenKind::Comment, scanned.span)));
            }
        }
    }

    /// Scan an attribute value at `at`: a quoted string with any of the three
    /// delimiters, or an unquoted run up to the next whitespace or `>`.
    ///
    /// For quoted values the token spans the text between the delimiters; for
    /// unquoted values it spans the run itself.
    pub fn scan_attribute_value(
        &self,
        input: &str,
        at: usize,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        if let Some(scanned) = scan_any_quoted(input, at) {
            let scanned = self.guard_terminated(scanned, "attribute value")?;
            let end = if scanned.terminated {
                scanned.span.end - 1
            } else {
                scanned.span.end
            };
            return Ok(Some(Token::new(
                HtmlTokenKind::AttributeValue,
                Span::new(scanned.span.start + 1, end),
            )));
        }
        let mut cursor = Cursor::new(input, at);
        let span = cursor.eat_while(|c| !c.is_ascii_whitespace() && c != '>');
        if span.is_empty() {
            return Ok(None);
        }
        Ok(Some(Token::new(HtmlTokenKind::AttributeValue, span)))
    }

    /// Scan an attribute at `at`: a name, optionally followed by `=` and a
    /// value. Whitespace around the `=` is allowed, and a name alone is a
    /// valid boolean attribute like `async`.
    pub fn scan_attribute(&self, input: &str, at: usize) -> Result<Option<Token<HtmlTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        let name = cursor.eat_while(is_attribute_name_char);
        if name.is_empty() {
            return Ok(None);
        }
        // Probe for `= value`; a boolean attribute keeps the cursor at the
        // end of its name so trailing whitespace stays outside the token.
        let mut probe = cursor.clone();
        probe.eat_while(|c| c.is_ascii_whitespace());
        if !probe.eat_char('=') {
            return Ok(Some(Token::new(HtmlTokenKind::Attribute, name)));
        }
        probe.eat_while(|c| c.is_ascii_whitespace());
        let Some(value) = self.scan_attribute_value(input, probe.pos())? else {
            // `name=` with nothing scannable after it; the name alone is the
            // attribute.
            return Ok(Some(Token::new(HtmlTokenKind::Attribute, name)));
        };
        // A quoted value token excludes its delimiters; the attribute span
        // still covers the closing quote if there is one.
        probe.advance_to(value.end());
        if matches!(probe.peek(), Some('"' | '\'' | '`')) {
            probe.bump();
        }
        let span = Span::new(at, probe.pos());
        Ok(Some(Token::with_nested(
            HtmlTokenKind::Attribute,
            span,
            vec![value],
        )))
    }

    /// Scan a repetition of attributes and whitespace at `at`, returning the
    /// attribute tokens. Attributes need no separating whitespace after a
    /// quoted value, mirroring what browsers accept.
    pub fn scan_attribute_list(&self, input: &str, at: usize) -> Result<Vec<Token<HtmlTokenKind>>> {
        let mut tokens = Vec::new();
        let mut cursor = Cursor::new(input, at);
        loop {
            cursor.eat_while(|c| c.is_ascii_whitespace());
            let Some(attribute) = self.scan_attribute(input, cursor.pos())? else {
                break;
            };
            cursor.advance_to(attribute.end());
            tokens.push(attribute);
        }
        Ok(tokens)
    }

    /// Scan a start tag at `at`: `<`, a tag name, attributes, an optional `/`
    /// and the closing `>`. A tag that never closes, like a trailing `<div`,
    /// is NoMatch rather than an unterminated construct.
    pub fn scan_start_tag(&self, input: &str, at: usize) -> Result<Option<Token<HtmlTokenKind>>> {
        Ok(self.scan_start_tag_impl(input, at)?.map(|tag| tag.token))
    }

    /// Scan an end tag at `at`: `</`, a tag name and `>`, with optional
    /// whitespace before the `>`.
    pub fn scan_end_tag(&self, input: &str, at: usize) -> Result<Option<Token<HtmlTokenKind>>> {
        self.scan_end_tag_impl(input, at, None)
    }

    /// Scan an end tag at `at` whose name equals `name`, compared ASCII
    /// case-insensitively.
    pub fn scan_end_tag_named(
        &self,
        input: &str,
        at: usize,
        name: &str,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        self.scan_end_tag_impl(input, at, Some(name))
    }

    /// Scan an element at `at`: a start tag, raw content and the end tag
    /// matching the start tag's name.
    ///
    /// A tag from the void set, or one closed with `/>`, produces a
    /// VoidElement with no content and no end tag. An element whose end tag
    /// is missing is taken to the end of the input. The returned token nests
    /// the StartTag, a TextRun for non-empty content, and the EndTag.
    pub fn scan_element(&self, input: &str, at: usize) -> Result<Option<Token<HtmlTokenKind>>> {
        self.scan_element_impl(input, at, None)
    }

    /// Scan an element at `at` whose tag name equals `name`, compared ASCII
    /// case-insensitively.
    pub fn scan_element_named(
        &self,
        input: &str,
        at: usize,
        name: &str,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        self.scan_element_impl(input, at, Some(name))
    }

    /// Scan an element at `at` that may contain same-named children, e.g.
    /// nested `<div>`s or `<ul>`s.
    ///
    /// Every further start tag with the same name increments a depth counter,
    /// every matching end tag decrements it, and the element ends when the
    /// depth returns to zero. Content in between is otherwise unconstrained.
    pub fn scan_nested_element(
        &self,
        input: &str,
        at: usize,
        name: &str,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        let started = self.observer.map(|_| Instant::now());
        let Some(first) = self.scan_start_tag_impl(input, at)? else {
            return Ok(None);
        };
        if !first.name.text(input).eq_ignore_ascii_case(name) {
            return Ok(None);
        }
        if first.self_closing || self.options.is_void_element(first.name.text(input)) {
            let span = first.token.span();
            self.observe(HtmlTokenKind::VoidElement, span, started);
            return Ok(Some(Token::with_nested(
                HtmlTokenKind::VoidElement,
                span,
                vec![first.token],
            )));
        }
        let mut cursor = Cursor::new(input, first.token.end());
        let mut depth = 1usize;
        let (content, end_tag) = loop {
            cursor.eat_while(|c| c != '<');
            if cursor.at_eof() {
                let scanned = Scanned::new(cursor.span_from(at), false);
                self.guard_terminated(scanned, "element")?;
                break (Span::new(first.token.end(), cursor.pos()), None);
            }
            if let Some(end_tag) = self.scan_end_tag_impl(input, cursor.pos(), Some(name))? {
                depth -= 1;
                if depth == 0 {
                    let content = Span::new(first.token.end(), cursor.pos());
                    cursor.advance_to(end_tag.end());
                    break (content, Some(end_tag));
                }
                cursor.advance_to(end_tag.end());
                continue;
            }
            if let Some(inner) = self.scan_start_tag_impl(input, cursor.pos())? {
                if inner.name.text(input).eq_ignore_ascii_case(name) && !inner.self_closing {
                    depth += 1;
                }
                cursor.advance_to(inner.token.end());
                continue;
            }
            cursor.bump();
        };
        let span = cursor.span_from(at);
        trace!("nested element '{}' at {}", name, span);
        let mut nested = vec![first.token];
        if !content.is_empty() {
            nested.push(Token::new(HtmlTokenKind::TextRun, content));
        }
        nested.extend(end_tag);
        self.observe(HtmlTokenKind::Element, span, started);
        Ok(Some(Token::with_nested(HtmlTokenKind::Element, span, nested)))
    }

    /// Scan a fragment starting at `at`: a repetition of comments, elements
    /// and text runs until the end of the input.
    ///
    /// Elements whose name is in the excluded set are consumed wholesale and
    /// produce no token. Character data, including things like a doctype that
    /// are neither comment nor tag, becomes TextRun tokens; adjacent runs are
    /// merged.
    pub fn scan_fragment(&self, input: &str, at: usize) -> Result<Token<HtmlTokenKind>> {
        let started = self.observer.map(|_| Instant::now());
        let mut nested: Vec<Token<HtmlTokenKind>> = Vec::new();
        let mut cursor = Cursor::new(input, at);
        // An out-of-range offset is clamped by the cursor; the span starts at
        // the clamped position so that start <= end always holds.
        let start = cursor.pos();
        while !cursor.at_eof() {
            if let Some(comment) = self.scan_comment(input, cursor.pos())? {
                cursor.advance_to(comment.end());
                nested.push(comment);
                continue;
            }
            if cursor.peek() == Some('<') {
                if let Some(element) = self.scan_element(input, cursor.pos())? {
                    let name = element_name(input, &element);
                    cursor.advance_to(element.end());
                    if name.is_some_and(|n| self.options.is_excluded_fragment_element(n)) {
                        trace!("skipping excluded element at {}", element.span());
                    } else {
                        nested.push(element);
                    }
                    continue;
                }
            }
            // Raw text up to the next `<`; a stray `<` is consumed as text.
            let start = cursor.pos();
            cursor.bump();
            cursor.eat_while(|c| c != '<');
            let run = cursor.span_from(start);
            match nested.last_mut() {
                Some(last) if last.kind() == HtmlTokenKind::TextRun && last.end() == run.start => {
                    *last = Token::new(HtmlTokenKind::TextRun, last.span().cover(run));
                }
                _ => nested.push(Token::new(HtmlTokenKind::TextRun, run)),
            }
        }
        let span = cursor.span_from(start);
        trace!("fragment at {} with {} children", span, nested.len());
        self.observe(HtmlTokenKind::Fragment, span, started);
        Ok(Token::with_nested(HtmlTokenKind::Fragment, span, nested))
    }

    fn scan_element_impl(
        &self,
        input: &str,
        at: usize,
        required_name: Option<&str>,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        let started = self.observer.map(|_| Instant::now());
        let Some(start) = self.scan_start_tag_impl(input, at)? else {
            return Ok(None);
        };
        let name = start.name.text(input);
        if let Some(required) = required_name {
            if !name.eq_ignore_ascii_case(required) {
                return Ok(None);
            }
        }
        if start.self_closing || self.options.is_void_element(name) {
            let span = start.token.span();
            self.observe(HtmlTokenKind::VoidElement, span, started);
            return Ok(Some(Token::with_nested(
                HtmlTokenKind::VoidElement,
                span,
                vec![start.token],
            )));
        }
        // Raw content scan: a `<` only ends the content when it starts the
        // end tag whose name matches the captured start tag name.
        let mut cursor = Cursor::new(input, start.token.end());
        let (content, end_tag) = loop {
            cursor.eat_while(|c| c != '<');
            if cursor.at_eof() {
                let scanned = Scanned::new(cursor.span_from(at), false);
                self.guard_terminated(scanned, "element")?;
                break (Span::new(start.token.end(), cursor.pos()), None);
            }
            if let Some(end_tag) = self.scan_end_tag_impl(input, cursor.pos(), Some(name))? {
                let content = Span::new(start.token.end(), cursor.pos());
                cursor.advance_to(end_tag.end());
                break (content, Some(end_tag));
            }
            cursor.bump();
        };
        let span = cursor.span_from(at);
        trace!("element '{}' at {}", name, span);
        let mut nested = vec![start.token];
        if !content.is_empty() {
            nested.push(Token::new(HtmlTokenKind::TextRun, content));
        }
        nested.extend(end_tag);
        self.observe(HtmlTokenKind::Element, span, started);
        Ok(Some(Token::with_nested(HtmlTokenKind::Element, span, nested)))
    }

    fn scan_start_tag_impl(&self, input: &str, at: usize) -> Result<Option<StartTag>> {
        let mut cursor = Cursor::new(input, at);
        if !cursor.eat_char('<') {
            return Ok(None);
        }
        let name = cursor.eat_while(is_tag_name_char);
        if name.is_empty() {
            return Ok(None);
        }
        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            cursor.eat_while(|c| c.is_ascii_whitespace());
            match cursor.peek() {
                Some('>') => {
                    cursor.bump();
                    break;
                }
                Some('/') => {
                    cursor.bump();
                    // Only a `/` directly before the `>` closes the tag.
                    self_closing = cursor.peek() == Some('>');
                }
                None => return Ok(None),
                _ => {
                    let Some(attribute) = self.scan_attribute(input, cursor.pos())? else {
                        // Not attribute-like and not a tag end; this is no
                        // well-formed start tag.
                        return Ok(None);
                    };
                    cursor.advance_to(attribute.end());
                    attributes.push(attribute);
                }
            }
        }
        let token =
            Token::with_nested(HtmlTokenKind::StartTag, cursor.span_from(at), attributes);
        Ok(Some(StartTag {
            token,
            name,
            self_closing,
        }))
    }

    fn scan_end_tag_impl(
        &self,
        input: &str,
        at: usize,
        required_name: Option<&str>,
    ) -> Result<Option<Token<HtmlTokenKind>>> {
        let mut cursor = Cursor::new(input, at);
        if !cursor.eat_str("</") {
            return Ok(None);
        }
        let name = cursor.eat_while(is_tag_name_char);
        if name.is_empty() {
            return Ok(None);
        }
        if let Some(required) = required_name {
            if !name.text(input).eq_ignore_ascii_case(required) {
                return Ok(None);
            }
        }
        cursor.eat_while(|c| c.is_ascii_whitespace());
        if !cursor.eat_char('>') {
            return Ok(None);
        }
        Ok(Some(Token::new(HtmlTokenKind::EndTag, cursor.span_from(at))))
    }

    fn guard_terminated(&self, scanned: Scanned, construct: &'static str) -> Result<Scanned> {
        if !scanned.terminated && !self.options.tolerate_unterminated {
            Err(ScanError::unterminated(construct, scanned.span.start))
        } else {
            Ok(scanned)
        }
    }

    fn observe(&self, kind: HtmlTokenKind, span: Span, started: Option<Instant>) {
        if let (Some(observer), Some(started)) = (self.observer, started) {
            observer.construct_scanned(kind.name(), span, started.elapsed());
        }
    }
}

/// Extract the tag name of an element token from its nested start tag.
fn element_name<'h>(input: &'h str, element: &Token<HtmlTokenKind>) -> Option<&'h str> {
    let start_tag = element.nested().first()?;
    let mut cursor = Cursor::new(input, start_tag.start());
    cursor.eat_char('<');
    let name = cursor.eat_while(is_tag_name_char);
    if name.is_empty() {
        None
    } else {
        Some(name.text(input))
    }
}

fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

fn is_attribute_name_char(c: char) -> bool {
    !c.is_ascii_whitespace() && !matches!(c, '/' | '"' | '\'' | '`' | '=' | '<' | '>')
}
