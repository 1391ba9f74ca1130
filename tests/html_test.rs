//! Integration tests for the HTML tokenizer, exercising comments, attributes,
//! tags, elements and fragments.

use webtok::{HtmlTokenKind, HtmlTokenizer, ScanErrorKind, ScanOptions};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_comment() {
    init();
    let html = "<!--\n        -- This is a comment --\n        -->";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_comment(html, 0).unwrap().unwrap();
    assert_eq!(token.text(html), html, "html comment");
}

#[test]
fn test_comment_malformed_close() {
    init();
    let html = "<!-- note --!> rest";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_comment(html, 0).unwrap().unwrap();
    assert_eq!(token.text(html), "<!-- note --!>");
}

#[test]
fn test_unterminated_comment() {
    init();
    let html = "<!-- never closed";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_comment(html, 0).unwrap().unwrap();
    assert_eq!(token.text(html), html);

    let strict =
        HtmlTokenizer::with_options(ScanOptions::new().tolerate_unterminated(false)).unwrap();
    let err = strict.scan_comment(html, 0).unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::UnterminatedConstruct("comment"));
}

/// Test data for the attribute tests: the attribute source and a message.
const ATTRIBUTE_TEST_DATA: &[(&str, &str)] = &[
    ("style=\"property:'value'\"", "double quote"),
    ("onopen='<script></script>'", "single quote"),
    ("id=item1", "no quotes"),
    ("class = \"open-container\"", "space around equal"),
    ("async", "binary attribute"),
];

#[test]
fn test_attribute() {
    init();
    let tokenizer = HtmlTokenizer::new();
    for (attribute, message) in ATTRIBUTE_TEST_DATA {
        let token = tokenizer
            .scan_attribute(attribute, 0)
            .unwrap()
            .unwrap_or_else(|| panic!("no attribute match: {}", message));
        assert_eq!(token.text(attribute), *attribute, "{}", message);
    }
}

#[test]
fn test_attribute_list() {
    init();
    let attributes = "id=\"item1\"class='item2' style=\"property:value\" async defer=\"defer\"";
    let tokenizer = HtmlTokenizer::new();
    let tokens = tokenizer.scan_attribute_list(attributes, 0).unwrap();
    assert_eq!(tokens.len(), 5, "attributes list");
    assert_eq!(tokens.last().unwrap().end(), attributes.len());
    assert_eq!(tokens[1].text(attributes), "class='item2'");
    assert_eq!(tokens[3].text(attributes), "async");
}

/// Test data for the start tag tests: the tag source and a message.
const START_TAG_TEST_DATA: &[(&str, &str)] = &[
    ("<div id=\"item1\">", "default"),
    ("<div  class = \"container\"   >", "extra space"),
    ("<script async defer>", "binary attributes"),
    ("<div>", "no attributes"),
    (
        "<link rel=\"stylesheet\" src=\"http://www.example.com/style.css\" />",
        "self closing"
    ),
];

#[test]
fn test_start_tag() {
    init();
    let tokenizer = HtmlTokenizer::new();
    for (tag, message) in START_TAG_TEST_DATA {
        let token = tokenizer
            .scan_start_tag(tag, 0)
            .unwrap()
            .unwrap_or_else(|| panic!("no start tag match: {}", message));
        assert_eq!(token.text(tag), *tag, "{}", message);
    }
}

#[test]
fn test_malformed_start_tag() {
    init();
    let tokenizer = HtmlTokenizer::new();
    // No closing `>`: NoMatch, but neither a crash nor an endless scan.
    assert!(tokenizer.scan_start_tag("<div", 0).unwrap().is_none());
    assert!(tokenizer.scan_element("<div", 0).unwrap().is_none());
}

/// Test data for the element tests: the element source, the required name if
/// any, and a message.
const ELEMENT_TEST_DATA: &[(&str, Option<&str>, &str)] = &[
    (
        "<script>const i; if (i < 0);</script>",
        Some("script"),
        "script"
    ),
    (
        "<style>h1 > span{property:value;}</style>",
        Some("style"),
        "style"
    ),
    (
        "<link rel=\"stylesheet\" src=\"http://www.example.com/style.css\" />",
        None,
        "void"
    ),
];

#[test]
fn test_element() {
    init();
    let tokenizer = HtmlTokenizer::new();
    for (html, name, message) in ELEMENT_TEST_DATA {
        let token = match name {
            Some(name) => tokenizer.scan_element_named(html, 0, name),
            None => tokenizer.scan_element(html, 0),
        }
        .unwrap()
        .unwrap_or_else(|| panic!("no element match: {}", message));
        assert_eq!(token.text(html), *html, "{}", message);
    }
}

#[test]
fn test_element_name_comparison_is_case_insensitive() {
    init();
    let html = "<DIV>content</div> rest";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_element_named(html, 0, "div").unwrap().unwrap();
    assert_eq!(token.text(html), "<DIV>content</div>");
}

#[test]
fn test_element_skips_foreign_end_tags() {
    init();
    let html = "<div>a<span>b</span>c</div>";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(token.text(html), html);
    // The content between the tags is one raw text run.
    assert_eq!(token.nested()[1].text(html), "a<span>b</span>c");
}

#[test]
fn test_void_element_without_end_tag() {
    init();
    let html = "<br>rest";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(token.kind(), HtmlTokenKind::VoidElement);
    assert_eq!(token.text(html), "<br>");
}

#[test]
fn test_nested_elements() {
    init();
    let html = "<ul><li><ul><li><span></span></li></ul></li></ul>";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_nested_element(html, 0, "ul").unwrap().unwrap();
    assert_eq!(token.text(html), html, "nested elements");
}

#[test]
fn test_nested_divs_span_the_whole_input() {
    init();
    let html = "<div><div></div></div>";
    let tokenizer = HtmlTokenizer::new();
    let token = tokenizer.scan_nested_element(html, 0, "div").unwrap().unwrap();
    // Depth returns to zero only at the final end tag, not at the first one.
    assert_eq!(token.end(), html.len());
}

#[test]
fn test_nested_element_requires_matching_name() {
    init();
    let tokenizer = HtmlTokenizer::new();
    assert!(tokenizer
        .scan_nested_element("<ol><li></li></ol>", 0, "ul")
        .unwrap()
        .is_none());
}

#[test]
fn test_fragment() {
    init();
    let html =
        "<!DOCTYPE html><html><head><title></title></head><body class=\"\"></body></html>";
    let tokenizer = HtmlTokenizer::new();
    let fragment = tokenizer.scan_fragment(html, 0).unwrap();
    assert_eq!(fragment.end(), html.len(), "nested elements");
    let kinds: Vec<_> = fragment.nested().iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, vec![HtmlTokenKind::TextRun, HtmlTokenKind::Element]);
}

#[test]
fn test_fragment_with_comment_and_text() {
    init();
    let html = "<!-- header -->\n<p>hello</p>\ntrailing";
    let tokenizer = HtmlTokenizer::new();
    let fragment = tokenizer.scan_fragment(html, 0).unwrap();
    let kinds: Vec<_> = fragment.nested().iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            HtmlTokenKind::Comment,
            HtmlTokenKind::TextRun,
            HtmlTokenKind::Element,
            HtmlTokenKind::TextRun
        ]
    );
}

#[test]
fn test_fragment_excludes_configured_elements() {
    init();
    let html = "<p>a</p><script>var x = \"<div>\";</script><p>b</p>";
    let options = ScanOptions::new().exclude_fragment_element("script");
    let tokenizer = HtmlTokenizer::with_options(options).unwrap();
    let fragment = tokenizer.scan_fragment(html, 0).unwrap();
    assert_eq!(fragment.end(), html.len());
    let elements: Vec<_> = fragment
        .nested()
        .iter()
        .filter(|t| t.kind() == HtmlTokenKind::Element)
        .map(|t| t.text(html))
        .collect();
    assert_eq!(elements, vec!["<p>a</p>", "<p>b</p>"]);
}

#[test]
fn test_custom_void_set() {
    init();
    let options = ScanOptions::new().void_elements(["spacer"]);
    let tokenizer = HtmlTokenizer::with_options(options).unwrap();
    let html = "<spacer>rest";
    let token = tokenizer.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(token.kind(), HtmlTokenKind::VoidElement);
    // With a custom set, `br` is an ordinary element again.
    let html = "<br>text</br>";
    let token = tokenizer.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(token.kind(), HtmlTokenKind::Element);
    assert_eq!(token.text(html), html);
}

#[test]
fn test_unterminated_element_strict() {
    init();
    let html = "<div>never closed";
    let strict =
        HtmlTokenizer::with_options(ScanOptions::new().tolerate_unterminated(false)).unwrap();
    let err = strict.scan_element(html, 0).unwrap_err();
    assert_eq!(err.kind, ScanErrorKind::UnterminatedConstruct("element"));

    let tolerant = HtmlTokenizer::new();
    let token = tolerant.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(token.end(), html.len());
}

#[test]
fn test_out_of_range_offset_yields_empty_span_at_end() {
    init();
    let html = "<p>a</p>";
    let tokenizer = HtmlTokenizer::new();
    let fragment = tokenizer.scan_fragment(html, 100).unwrap();
    assert!(fragment.span().start <= fragment.span().end);
    assert_eq!(fragment.span().range(), html.len()..html.len());
    assert_eq!(fragment.text(html), "");
    assert!(fragment.nested().is_empty());
}

#[test]
fn test_rescan_returns_identical_token() {
    init();
    let html = "<ul><li>a</li><li>b</li></ul>";
    let tokenizer = HtmlTokenizer::new();
    let first = tokenizer.scan_element(html, 0).unwrap().unwrap();
    let second = tokenizer.scan_element(html, 0).unwrap().unwrap();
    assert_eq!(first, second);
}
