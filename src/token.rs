#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Span;

/// A token produced by one of the tokenizers.
///
/// A token is a classified span of the scanned input. Container constructs,
/// e.g. a CSS rule or an HTML element, additionally carry their child tokens
/// in `nested`; for leaf constructs `nested` is empty. Tokens never own text,
/// they only reference the input through their span.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Token<K> {
    kind: K,
    span: Span,
    nested: Vec<Token<K>>,
}

impl<K: Copy> Token<K> {
    /// Create a new leaf token.
    pub fn new(kind: K, span: Span) -> Self {
        Token {
            kind,
            span,
            nested: Vec::new(),
        }
    }

    /// Create a new container token with child tokens.
    pub fn with_nested(kind: K, span: Span, nested: Vec<Token<K>>) -> Self {
        Token { kind, span, nested }
    }

    /// Get the kind of the token.
    #[inline]
    pub fn kind(&self) -> K {
        self.kind
    }

    /// Get the span of the token.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the start of the token.
    #[inline]
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Get the end of the token, i.e. the offset scanning continues at.
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }

    /// Get the child tokens of the token.
    #[inline]
    pub fn nested(&self) -> &[Token<K>] {
        &self.nested
    }

    /// Extract the text of the token from the input it was scanned from.
    #[inline]
    pub fn text<'h>(&self, input: &'h str) -> &'h str {
        self.span.text(input)
    }
}

/// The token kinds produced by the CSS tokenizer.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CssTokenKind {
    /// A quoted string literal.
    String,
    /// A block comment.
    Comment,
    /// A `url(...)` token.
    Url,
    /// A CSS identifier, possibly containing escape sequences.
    Ident,
    /// The selector part of a rule, up to but not including the `{`.
    SelectorList,
    /// The content between a rule's braces.
    DeclarationList,
    /// A qualified rule: selector list plus declaration block.
    Rule,
    /// A statement at-rule terminated by `;`, e.g. `@import ...;`.
    RegularAtRule,
    /// A block at-rule, e.g. `@media ... { ... }`.
    NestingAtRule,
    /// A whole stylesheet.
    Stylesheet,
}

impl CssTokenKind {
    /// The name of the token kind, as reported to a [`crate::ScanObserver`].
    pub fn name(&self) -> &'static str {
        match self {
            CssTokenKind::String => "string",
            CssTokenKind::Comment => "comment",
            CssTokenKind::Url => "url",
            CssTokenKind::Ident => "ident",
            CssTokenKind::SelectorList => "selector list",
            CssTokenKind::DeclarationList => "declaration list",
            CssTokenKind::Rule => "rule",
            CssTokenKind::RegularAtRule => "regular at-rule",
            CssTokenKind::NestingAtRule => "nesting at-rule",
            CssTokenKind::Stylesheet => "stylesheet",
        }
    }
}

impl std::fmt::Display for CssTokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The token kinds produced by the HTML tokenizer.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HtmlTokenKind {
    /// An HTML comment.
    Comment,
    /// The value of an attribute, quoted or unquoted.
    AttributeValue,
    /// An attribute, with or without a value.
    Attribute,
    /// A start tag including its attributes.
    StartTag,
    /// An end tag.
    EndTag,
    /// An element: start tag, content and matching end tag.
    Element,
    /// An element from the void set, or a self-closed tag; has no end tag.
    VoidElement,
    /// A run of character data between tags.
    TextRun,
    /// A sequence of comments, elements and text runs.
    Fragment,
}

impl HtmlTokenKind {
    /// The name of the token kind, as reported to a [`crate::ScanObserver`].
    pub fn name(&self) -> &'static str {
        match self {
            HtmlTokenKind::Comment => "comment",
            HtmlTokenKind::AttributeValue => "attribute value",
            HtmlTokenKind::Attribute => "attribute",
            HtmlTokenKind::StartTag => "start tag",
            HtmlTokenKind::EndTag => "end tag",
            HtmlTokenKind::Element => "element",
            HtmlTokenKind::VoidElement => "void element",
            HtmlTokenKind::TextRun => "text run",
            HtmlTokenKind::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for HtmlTokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
