//! Integration tests for whole-document assembly.

use trellis_dom::{ElementNode, TextPolicy};
use trellis_html::{DOCTYPE, Document, DocumentOptions, RenderOptions, Tag};

#[test]
fn test_empty_document() {
    let doc = Document::new([], []);
    assert_eq!(
        doc.to_string(),
        "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
  </head>
  <body>
  </body>
</html>
"
    );
}

#[test]
fn test_nonempty_document() {
    let script = Tag::Script.node().with_text("console.log(\"hello\")");
    let span = Tag::Span.node().with_text("abcd");
    let doc = Document::new([script], [span]);

    assert_eq!(
        doc.render().collect::<String>(),
        "<!DOCTYPE html>
<html lang=\"en\">
  <head>
    <meta charset=\"utf-8\">
    <script>
      console.log(\"hello\")
    </script>
  </head>
  <body>
    <span>
      abcd
    </span>
  </body>
</html>
"
    );
}

#[test]
fn test_charset_meta_comes_before_title() {
    let doc = Document::new([ElementNode::element("title").with_text("t")], []);
    let out: String = doc.render().collect();

    assert!(out.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[2], "  <head>");
    assert_eq!(lines[3], "    <meta charset=\"utf-8\">");
    assert_eq!(lines[4], "    <title>");
    assert_eq!(lines[5], "      t");
}

#[test]
fn test_options_set_lang_charset_and_viewport() {
    let options = DocumentOptions {
        lang: "fr".to_string(),
        charset: "iso-8859-1".to_string(),
        viewport: Some("width=device-width, initial-scale=1".to_string()),
    };
    let doc = Document::with_options([], [Tag::Hr.node()], &options);

    assert_eq!(
        doc.to_string(),
        "<!DOCTYPE html>
<html lang=\"fr\">
  <head>
    <meta charset=\"iso-8859-1\">
    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
  </head>
  <body>
    <hr>
  </body>
</html>
"
    );
}

#[test]
fn test_root_shape() {
    let doc = Document::new([], []);
    let root = doc.root();
    assert_eq!(root.tag_name(), "html");
    assert!(Tag::Html.check(root).is_ok());

    let children = root.children().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].tag_name(), "head");
    assert_eq!(children[1].tag_name(), "body");
}

#[test]
fn test_render_with_indent_width() {
    let doc = Document::new([], []);
    let out: String = doc.render_with(RenderOptions { indent_width: 1 }).collect();
    assert!(out.starts_with(DOCTYPE));
    assert!(out.contains("\n <head>\n  <meta charset=\"utf-8\">\n </head>\n"));
}

#[test]
fn test_document_text_policies_survive() {
    let area = Tag::Textarea.node().with_text("x");
    assert_eq!(area.text_policy(), TextPolicy::UNINDENTED);

    let doc = Document::new([], [area]);
    assert!(doc.to_string().contains("    <textarea>\nx\n    </textarea>\n"));
}
