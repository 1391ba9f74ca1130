use rustc_hash::FxHashSet;

/// The standard HTML void element names, plus the legacy `command` and
/// `keygen`.
pub const DEFAULT_VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "command", "keygen",
];

/// Options shared by the CSS and HTML tokenizers.
///
/// The defaults reproduce the tolerant behavior of the scanners: constructs
/// that are opened but never closed are implicitly closed at the end of the
/// input. The options are built with chainable setters:
///
/// ```rust
/// use webtok::ScanOptions;
///
/// let options = ScanOptions::new()
///     .tolerate_unterminated(false)
///     .exclude_fragment_element("script")
///     .exclude_fragment_element("style");
/// ```
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Whether an unterminated construct is closed at end of input instead of
    /// being reported as an error. Defaults to true.
    pub tolerate_unterminated: bool,
    /// Whether a backslash that does not start a valid CSS escape sequence is
    /// reported as an error instead of being scanned over. Defaults to false.
    pub strict_escape_validation: bool,
    /// The element names treated as void, i.e. having no content and no end
    /// tag. Stored lowercase, matched ASCII case-insensitively.
    pub void_elements: FxHashSet<String>,
    /// Element names a fragment scan consumes wholesale without producing
    /// tokens, typically script- and style-like elements. Defaults to empty.
    pub excluded_fragment_elements: FxHashSet<String>,
}

impl ScanOptions {
    /// Create options with the default tolerant behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether unterminated constructs are tolerated.
    pub fn tolerate_unterminated(mut self, tolerate: bool) -> Self {
        self.tolerate_unterminated = tolerate;
        self
    }

    /// Set whether invalid CSS escape sequences are rejected.
    pub fn strict_escape_validation(mut self, strict: bool) -> Self {
        self.strict_escape_validation = strict;
        self
    }

    /// Replace the void element set.
    pub fn void_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.void_elements = names
            .into_iter()
            .map(|name| name.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Add an element name to the fragment exclusion set.
    pub fn exclude_fragment_element(mut self, name: &str) -> Self {
        self.excluded_fragment_elements
            .insert(name.to_ascii_lowercase());
        self
    }

    /// Check whether `name` is a void element, ASCII case-insensitively.
    pub fn is_void_element(&self, name: &str) -> bool {
        self.void_elements.contains(&name.to_ascii_lowercase())
    }

    /// Check whether `name` is excluded from fragment scans.
    pub fn is_excluded_fragment_element(&self, name: &str) -> bool {
        self.excluded_fragment_elements
            .contains(&name.to_ascii_lowercase())
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            tolerate_unterminated: true,
            strict_escape_validation: false,
            void_elements: DEFAULT_VOID_ELEMENTS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            excluded_fragment_elements: FxHashSet::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_void_elements() {
        let options = ScanOptions::new();
        assert!(options.is_void_element("br"));
        assert!(options.is_void_element("IMG"));
        assert!(!options.is_void_element("div"));
    }

    #[test]
    fn test_excluded_elements() {
        let options = ScanOptions::new().exclude_fragment_element("SCRIPT");
        assert!(options.is_excluded_fragment_element("script"));
        assert!(!options.is_excluded_fragment_element("div"));
    }
}
