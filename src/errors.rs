use thiserror::Error;

/// The result type for the `webtok` crate.
pub type Result<T> = std::result::Result<T, ScanError>;

/// The error type for the `webtok` crate.
///
/// Note that failing to find a construct at a given offset is not an error;
/// the scanners report it as `Ok(None)`. Errors are limited to strict-mode
/// rejections and invalid configuration.
#[derive(Error, Debug)]
#[error("{kind} at offset {offset}")]
pub struct ScanError {
    /// The kind of the error.
    pub kind: ScanErrorKind,
    /// The byte offset the error was detected at.
    pub offset: usize,
}

impl ScanError {
    /// Create a new `ScanError`.
    pub fn new(kind: ScanErrorKind, offset: usize) -> Self {
        ScanError { kind, offset }
    }

    /// Create an unterminated-construct error.
    pub fn unterminated(construct: &'static str, offset: usize) -> Self {
        ScanError::new(ScanErrorKind::UnterminatedConstruct(construct), offset)
    }
}

/// The error kind type.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A construct was opened but not closed before the end of the input.
    /// Only reported when `tolerate_unterminated` is switched off.
    #[error("unterminated {0}")]
    UnterminatedConstruct(&'static str),

    /// A backslash that does not start a valid CSS escape sequence.
    /// Only reported when `strict_escape_validation` is switched on.
    #[error("invalid escape sequence")]
    InvalidEscapeSequence,

    /// The scan options are unusable, e.g. an empty void element set.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
