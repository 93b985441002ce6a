/// Integration tests for xmlfmt
///
/// These tests verify:
/// 1. End-to-end formatting of documents, prologs and leading nodes
/// 2. Mixed-content and whitespace-preservation semantics
/// 3. Idempotence of formatting under a constant configuration
use std::collections::HashMap;
use std::path::PathBuf;

use xmlfmt::xot::{Node, Xot};
use xmlfmt::{format, format_with_options, Formatter, FormatterOptions};

fn get_fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Reverses attribute escaping the way a standard XML-entity decoder would
fn unescape(value: &str) -> String {
    value
        .replace("&apos;", "'")
        .replace("&quot;", "\"")
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&amp;", "&")
}

#[test]
fn test_simple_document() {
    let formatted = format("<root><a/><b attr=\"x&amp;y\"/></root>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<a/>\r\n\t<b attr=\"x&amp;y\"/>\r\n</root>"
    );
}

#[test]
fn test_leading_comment_before_root() {
    let formatted = format("<!--c--><root/>").unwrap();
    assert_eq!(formatted, "<?xml version=\"1.0\"?>\r\n<!--c-->\r\n<root/>");
}

#[test]
fn test_leading_processing_instruction() {
    let formatted = format("<?pi data?><root/>").unwrap();
    assert_eq!(formatted, "<?xml version=\"1.0\"?>\r\n<?pi data?>\r\n<root/>");
}

#[test]
fn test_declared_encoding_is_kept() {
    let formatted = format("<?xml version=\"1.0\" encoding=\"UTF-8\"?><root/>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n<root/>"
    );
}

#[test]
fn test_deep_nesting_indents_per_level() {
    let formatted = format("<a><b><c><d/></c></b></a>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<a>\r\n\t<b>\r\n\t\t<c>\r\n\t\t\t<d/>\r\n\t\t</c>\r\n\t</b>\r\n</a>"
    );
}

#[test]
fn test_comment_inside_element() {
    let formatted = format("<root><!--c--><a/></root>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<!--c-->\r\n\t<a/>\r\n</root>"
    );
}

#[test]
fn test_mixed_content_keeps_inline_shape() {
    let formatted = format("<doc><p>Hello <b>world</b>!</p><div><a/></div></doc>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<doc>\r\n\t<p>Hello <b>world</b>!</p>\r\n\t<div>\r\n\t\t<a/>\r\n\t</div>\r\n</doc>"
    );
}

#[test]
fn test_whitespace_text_suppresses_breaks() {
    // text runs are copied verbatim, and no break is added next to them
    let formatted = format("<root> <a/> </root>").unwrap();
    assert_eq!(formatted, "<?xml version=\"1.0\"?>\r\n<root> <a/> </root>");
}

#[test]
fn test_element_with_single_text_child_stays_inline() {
    let formatted = format("<root><to>Text</to></root>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<to>Text</to>\r\n</root>"
    );
}

#[test]
fn test_preserve_space_subtree_is_untouched() {
    let formatted =
        format("<root><pre xml:space=\"preserve\">  keep  <b> this </b>  </pre><a/></root>")
            .unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<pre xml:space=\"preserve\">  keep  <b> this </b>  </pre>\r\n\t<a/>\r\n</root>"
    );
}

#[test]
fn test_preserve_space_is_inherited_by_descendants() {
    let formatted = format("<root xml:space=\"preserve\"><a><b/></a></root>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root xml:space=\"preserve\"><a><b/></a></root>"
    );
}

#[test]
fn test_preserve_space_reset_by_default_value() {
    let formatted =
        format("<root xml:space=\"preserve\">A<code xml:space=\"default\"><x/></code>B</root>")
            .unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root xml:space=\"preserve\">A<code xml:space=\"default\">\r\n\t\t<x/>\r\n\t</code>B</root>"
    );
}

#[test]
fn test_namespace_declarations_and_prefixes() {
    let formatted =
        format("<root xmlns:p=\"http://p\"><p:child p:attr=\"v\">x</p:child></root>").unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root xmlns:p=\"http://p\">\r\n\t<p:child p:attr=\"v\">x</p:child>\r\n</root>"
    );
}

#[test]
fn test_default_namespace_renders_without_prefix() {
    let formatted = format("<root xmlns=\"http://d\"><child/></root>").unwrap();
    assert!(formatted.contains("<root xmlns=\"http://d\">"));
    assert!(formatted.contains("\r\n\t<child/>"));
    assert!(formatted.ends_with("</root>"));
}

#[test]
fn test_attribute_escaping_round_trip() {
    let formatted = format("<r a=\"&lt;&amp;&gt;&quot;&apos;q\"/>").unwrap();
    let start = formatted.find("a=\"").unwrap() + 3;
    let end = formatted.rfind('"').unwrap();
    let escaped = &formatted[start..end];

    assert_eq!(escaped, "&lt;&amp;&gt;&quot;&apos;q");
    assert_eq!(unescape(escaped), "<&>\"'q");
}

#[test]
fn test_custom_linebreak_and_indentation() {
    let options = FormatterOptions::new()
        .with_linebreak("\n")
        .with_indentation("  ");
    let formatted = format_with_options("<root><a/></root>", options).unwrap();
    assert_eq!(formatted, "<?xml version=\"1.0\"?>\n<root>\n  <a/>\n</root>");
}

#[test]
fn test_custom_preserve_space_attribute() {
    let options = FormatterOptions::new().with_preserve_space_attribute("keep");
    let formatted =
        format_with_options("<root><pre keep=\"preserve\"> a <b/> </pre></root>", options)
            .unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<pre keep=\"preserve\"> a <b/> </pre>\r\n</root>"
    );
}

#[test]
fn test_custom_preserve_space_fn() {
    let options = FormatterOptions::new().with_preserve_space_fn(Box::new(
        |xot: &Xot, node: Node, _attrs: &HashMap<String, String>, inherited: bool| {
            match xot.element(node) {
                Some(element) => inherited || xot.local_name_str(element.name()) == "code",
                None => inherited,
            }
        },
    ));
    let formatted =
        format_with_options("<root><code> x  <b/> </code><a/></root>", options).unwrap();
    assert_eq!(
        formatted,
        "<?xml version=\"1.0\"?>\r\n<root>\r\n\t<code> x  <b/> </code>\r\n\t<a/>\r\n</root>"
    );
}

#[test]
fn test_formatting_is_idempotent() {
    let inputs = [
        "<root><a/><b attr=\"x&amp;y\"/></root>",
        "<doc><p>Hello <b>world</b>!</p><div><a/></div></doc>",
        "<!--c--><root><pre xml:space=\"preserve\">  keep  </pre><a/></root>",
        "<a><b><c><d/></c></b></a>",
    ];

    let formatter = Formatter::new();
    for input in inputs {
        let once = formatter.format(input).unwrap();
        let twice = formatter.format(&once).unwrap();
        assert_eq!(once, twice, "re-formatting changed output for {}", input);
    }
}

#[test]
fn test_formatter_is_shareable_across_threads() {
    let formatter = std::sync::Arc::new(Formatter::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let formatter = formatter.clone();
            std::thread::spawn(move || {
                let xml = format!("<root><a n=\"{}\"/></root>", i);
                formatter.format(&xml).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let formatted = handle.join().unwrap();
        assert!(formatted.contains(&format!("n=\"{}\"", i)));
    }
}

#[test]
fn test_fixture_document() {
    let fixture_path = get_fixtures_dir().join("note.xml");
    let xml = std::fs::read_to_string(&fixture_path).expect("Should read fixture");

    let formatter = Formatter::new();
    let once = formatter.format(&xml).expect("Should format fixture");

    assert!(once.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(once.contains("<!-- reminders exported for testing -->"));
    assert!(once.contains("xml:space=\"preserve\""));
    // the preserved block keeps its internal spacing
    assert!(once.contains("xml:space=\"preserve\">  kind regards,\n  app  </signature>"));

    let twice = formatter.format(&once).expect("Should format again");
    assert_eq!(once, twice);
}
