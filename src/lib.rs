#![forbid(missing_docs)]
//! # `webtok`
//! The `webtok` crate is a library that provides lexical scanners for CSS
//! stylesheets and HTML-like markup.
//! It is designed to be used by rewriting and optimization tools that need to
//! locate strings, comments, rules, at-rules, tags and attributes inside
//! source text without building a full parse tree.
//! The scanners are composable: quoted strings, comments, CSS escape
//! sequences and balanced brace blocks are scanned by small standalone
//! functions, and the CSS and HTML tokenizers combine them into rule,
//! at-rule, tag and element tokens.
//! All scanning is single-pass and forward-only, so scan time stays linear in
//! the input length, unlike the backtracking regex patterns the scanners
//! replace.
//! By default the scanners are tolerant: a construct that is opened but never
//! closed is implicitly closed at the end of the input, which keeps truncated
//! or malformed documents tokenizable.
//!
//! # Example
//! ```rust
//! use webtok::{CssTokenizer, CssTokenKind};
//!
//! const INPUT: &str = r#"
//! @media (min-width: 600px) {
//!     nav { display: flex; }
//! }
//! p { color: red; }
//! "#;
//!
//! fn main() {
//!     let tokenizer = CssTokenizer::new();
//!     let stylesheet = tokenizer.scan_stylesheet(INPUT, 0).expect("scan error");
//!     for token in stylesheet.nested() {
//!         println!("{}: {:?}", token.kind(), token.text(INPUT));
//!     }
//! }
//! ```
//! The output of the example is:
//! ```text
//! nesting at-rule: "@media (min-width: 600px) {\n    nav { display: flex; }\n}"
//! rule: "p { color: red; }"
//! ```
//!
//! # Crate features
//! The crate has the following features:
//! - `serde`: Enabled by default. Adds `Serialize`/`Deserialize`
//!   implementations for spans, tokens and token kinds.

/// Module with the balanced block scanner.
mod block;
pub use block::scan_balanced_block;

/// Module with the comment scanners.
mod comment;
pub use comment::{scan_block_comment, scan_comment, scan_line_comment};

/// Module with the cursor type.
mod cursor;
pub use cursor::Cursor;

/// Module with the CSS tokenizer.
mod css;
pub use css::CssTokenizer;

/// Module with error definitions.
mod errors;
pub use errors::{Result, ScanError, ScanErrorKind};

/// Module with the CSS escape sequence scanner.
mod escape;
pub use escape::scan_css_escape;

/// Module with the HTML tokenizer.
mod html;
pub use html::HtmlTokenizer;

/// Module with the scan observer.
mod observer;
pub use observer::{NullObserver, ScanObserver};

/// Module with the scan options.
mod options;
pub use options::{ScanOptions, DEFAULT_VOID_ELEMENTS};

/// Module with the quoted string scanners.
mod quoted;
pub use quoted::{scan_any_quoted, scan_back_tick, scan_double_quoted, scan_single_quoted};

/// Module that provides the Span and Scanned types.
mod span;
pub use span::{Scanned, Span};

/// Module that provides the Token type and the token kinds.
mod token;
pub use token::{CssTokenKind, HtmlTokenKind, Token};

/// Module with the scanner for CSS url tokens.
mod url;
pub use url::scan_url;
