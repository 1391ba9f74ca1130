#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span in the scanned input.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Span {
    /// The start byte offset of the span, inclusive.
    pub start: usize,
    /// The end byte offset of the span, exclusive.
    pub end: usize,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Check if the span is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Get the length of the span in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Get the span as range.
    #[inline]
    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Extract the text the span covers from the input it was produced from.
    #[inline]
    pub fn text(self, input: &str) -> &str {
        &input[self.range()]
    }

    /// Create the smallest span that covers both `self` and `other`.
    pub fn cover(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl<T> From<std::ops::Range<T>> for Span
where
    T: Into<usize>,
{
    fn from(range: std::ops::Range<T>) -> Self {
        Span {
            start: range.start.into(),
            end: range.end.into(),
        }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The result of a low-level scan.
///
/// `terminated` is false when the construct was implicitly closed at the end
/// of the input, e.g. a string without its closing delimiter. Tolerant callers
/// ignore the flag; strict callers turn it into an error.
#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scanned {
    /// The span of the scanned construct.
    pub span: Span,
    /// Whether the construct was properly terminated before end of input.
    pub terminated: bool,
}

impl Scanned {
    /// Create a new scan result.
    #[inline]
    pub fn new(span: Span, terminated: bool) -> Self {
        Scanned { span, terminated }
    }

    /// The end offset of the scanned construct, i.e. where scanning resumes.
    #[inline]
    pub fn end(&self) -> usize {
        self.span.end
    }
}
