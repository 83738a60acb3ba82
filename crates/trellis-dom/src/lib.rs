//! Element tree model for the Trellis HTML generator.
//!
//! An [`ElementNode`] is the description of one HTML element before it is
//! rendered: a tag name, optional text, optional children and an ordered
//! attribute map. Nodes own their children, so a tree is just its root.
//!
//! # Void vs. empty
//!
//! [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
//! "Void elements only have a start tag; end tags must not be specified for
//! void elements."
//!
//! `children: None` marks a void element. `children: Some(vec![])` is a normal
//! element that happens to have no content and still gets an end tag. This is
//! the only thing the renderer looks at to choose between the two forms.

mod attr;

use serde::{Deserialize, Serialize};
use trellis_common::warning::warn_once;

pub use attr::{AttrValue, AttributesMap, decode_attr_name};

/// How an element's text content is written out.
///
/// [§ 13.1.2.1 Start tags / § 13.1.2.6 Restrictions on the contents of raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#cdata-rcdata-restrictions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TextPolicy {
    /// Replace `&`, `<` and `>` with character references.
    ///
    /// Off for raw text elements (`script`, `style`), whose content is not
    /// parsed for references.
    pub escape: bool,
    /// Indent the text one level deeper than the tags, including every line
    /// after an embedded newline.
    ///
    /// Off for elements where leading whitespace is content (`textarea`).
    pub indent: bool,
}

impl TextPolicy {
    /// Escaped and indented. The default.
    pub const ESCAPED: Self = Self {
        escape: true,
        indent: true,
    };

    /// Written verbatim but indented.
    pub const RAW: Self = Self {
        escape: false,
        indent: true,
    };

    /// Escaped, with no indentation at all.
    pub const UNINDENTED: Self = Self {
        escape: true,
        indent: false,
    };

    /// Whether this is [`TextPolicy::ESCAPED`].
    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::ESCAPED
    }
}

/// `skip_serializing_if` hands over a reference.
#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_default_policy(policy: &TextPolicy) -> bool {
    policy.is_default()
}

impl Default for TextPolicy {
    fn default() -> Self {
        Self::ESCAPED
    }
}

/// One element of the tree to be rendered.
///
/// Built once, then only read. Builder methods take `self` by value, so once
/// a node has been placed into a parent there is no way to change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementNode {
    /// Trusted and never escaped.
    #[serde(rename = "tag")]
    tag_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// `None` = void element.
    #[serde(default)]
    children: Option<Vec<ElementNode>>,
    #[serde(default, skip_serializing_if = "AttributesMap::is_empty")]
    attributes: AttributesMap,
    #[serde(default, skip_serializing_if = "is_default_policy")]
    text_policy: TextPolicy,
}

impl ElementNode {
    /// Create a node from all of its parts.
    ///
    /// Nothing is validated: the tag name is trusted, and a node may carry
    /// both text and children (the text wins when rendering).
    #[must_use]
    pub fn new(
        tag_name: impl Into<String>,
        text: Option<String>,
        children: Option<Vec<Self>>,
        attributes: AttributesMap,
    ) -> Self {
        Self {
            tag_name: tag_name.into(),
            text,
            children,
            attributes,
            text_policy: TextPolicy::default(),
        }
    }

    /// A normal element with no text, no children and no attributes.
    #[must_use]
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::new(tag_name, None, Some(Vec::new()), AttributesMap::new())
    }

    /// A void element with no attributes.
    #[must_use]
    pub fn void(tag_name: impl Into<String>) -> Self {
        Self::new(tag_name, None, None, AttributesMap::new())
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append one child.
    ///
    /// Void-ness is fixed when the node is created: on a void node the child
    /// is dropped with a warning.
    #[must_use]
    pub fn with_child(self, child: Self) -> Self {
        self.with_children(std::iter::once(child))
    }

    /// Append children in order.
    ///
    /// Accepts anything iterable, so an `Option<ElementNode>` adds a child
    /// only when present.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        match self.children.as_mut() {
            Some(existing) => existing.extend(children),
            None => {
                if children.into_iter().next().is_some() {
                    warn_once(
                        "DOM",
                        &format!("children dropped on void element <{}>", self.tag_name),
                    );
                }
            }
        }
        self
    }

    /// Set one attribute. Re-setting a name keeps its original position.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        let _ = self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set several attributes, in the map's order.
    #[must_use]
    pub fn with_attributes(mut self, attributes: AttributesMap) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Set how the text content is written.
    #[must_use]
    pub fn with_text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    /// The element's tag name.
    #[must_use]
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// The text content, if any was set (possibly empty).
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether there is non-empty text to render.
    #[must_use]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    /// The children, or `None` for a void element.
    #[must_use]
    pub fn children(&self) -> Option<&[Self]> {
        self.children.as_deref()
    }

    /// The attributes in render order.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attributes
    }

    /// How the text content is written.
    #[must_use]
    pub const fn text_policy(&self) -> TextPolicy {
        self.text_policy
    }

    /// Whether this is a void element (no end tag, no content).
    #[must_use]
    pub const fn is_void(&self) -> bool {
        self.children.is_none()
    }

    /// Iterate over this node and all of its descendants in document order.
    ///
    /// Children of a void node are never visited, matching what gets
    /// rendered.
    #[must_use]
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse { stack: vec![self] }
    }
}

/// Pre-order iterator over a node and its descendants.
pub struct Traverse<'a> {
    stack: Vec<&'a ElementNode>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = &'a ElementNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}
