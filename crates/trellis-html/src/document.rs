//! Whole-document assembly.
//!
//! [§ 13.1 Writing HTML documents](https://html.spec.whatwg.org/multipage/syntax.html#writing)
//! "Documents must consist of the following parts, in the given order: ...
//! A DOCTYPE ... The document element, in the form of an html element."

use std::fmt::{self, Write as _};
use std::iter::Chain;
use std::str::Chars;

use trellis_dom::ElementNode;

use crate::render::{Render, RenderOptions, render_with};
use crate::tags::Tag;

/// [§ 13.1.1 The DOCTYPE](https://html.spec.whatwg.org/multipage/syntax.html#the-doctype)
pub const DOCTYPE: &str = "<!DOCTYPE html>\n";

/// What goes into the boilerplate around the caller's elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// `lang` attribute of the `html` element.
    pub lang: String,
    /// `charset` of the leading `meta` element.
    pub charset: String,
    /// `content` of a `<meta name="viewport">` placed right after the
    /// charset, when set.
    pub viewport: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            charset: "utf-8".to_string(),
            viewport: None,
        }
    }
}

/// The characters of a rendered document: the doctype line, then the
/// `html` element.
pub type DocumentRender<'a> = Chain<Chars<'static>, Render<'a>>;

/// A complete page: the caller's head and body elements inside the
/// `html`/`head`/`body` skeleton.
///
/// ```
/// use trellis_dom::ElementNode;
/// use trellis_html::Document;
///
/// let doc = Document::new([ElementNode::element("title").with_text("t")], []);
/// let html = doc.to_string();
/// assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n    <meta charset=\"utf-8\">\n"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: ElementNode,
}

impl Document {
    /// Wrap head and body elements with the default options.
    #[must_use]
    pub fn new(
        head_els: impl IntoIterator<Item = ElementNode>,
        body_els: impl IntoIterator<Item = ElementNode>,
    ) -> Self {
        Self::with_options(head_els, body_els, &DocumentOptions::default())
    }

    /// Wrap head and body elements.
    ///
    /// The charset `meta` always comes first in `head`, before the optional
    /// viewport `meta` and then the caller's elements.
    #[must_use]
    pub fn with_options(
        head_els: impl IntoIterator<Item = ElementNode>,
        body_els: impl IntoIterator<Item = ElementNode>,
        options: &DocumentOptions,
    ) -> Self {
        let viewport = options.viewport.as_ref().map(|content| {
            Tag::Meta
                .node()
                .with_attr("name", "viewport")
                .with_attr("content", content)
        });

        let head = Tag::Head
            .node()
            .with_child(Tag::Meta.node().with_attr("charset", &options.charset))
            .with_children(viewport)
            .with_children(head_els);
        let body = Tag::Body.node().with_children(body_els);

        let root = Tag::Html
            .node()
            .with_attr("lang", &options.lang)
            .with_child(head)
            .with_child(body);
        Self { root }
    }

    /// The synthesized `html` element.
    #[must_use]
    pub const fn root(&self) -> &ElementNode {
        &self.root
    }

    /// The document's characters, lazily.
    #[must_use]
    pub fn render(&self) -> DocumentRender<'_> {
        self.render_with(RenderOptions::default())
    }

    /// [`Document::render`] with explicit options.
    #[must_use]
    pub fn render_with(&self, options: RenderOptions) -> DocumentRender<'_> {
        DOCTYPE.chars().chain(render_with(&self.root, 0, options))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render().try_for_each(|c| f.write_char(c))
    }
}
