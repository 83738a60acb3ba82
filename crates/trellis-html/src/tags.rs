//! The catalogue of element names this crate knows about.
//!
//! [§ 4 The elements of HTML](https://html.spec.whatwg.org/multipage/#toc-semantics)
//!
//! The renderer accepts any tag name. [`Tag`] adds what it means to be a
//! particular element: whether it is void, which attributes it needs, and how
//! its text is written. [`Tag::node`] gives a correctly shaped empty node;
//! [`Tag::build`] and [`Tag::check`] enforce the rules.

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use trellis_dom::{AttrValue, AttributesMap, ElementNode, TextPolicy};

use crate::error::BuildError;
use crate::escape::escape_attr_value;

/// A known HTML element.
///
/// `Display` and `FromStr` use the lowercase tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Tag {
    /// `a`
    #[strum(serialize = "a")]
    Anchor,
    /// `body`
    Body,
    /// `br`
    Br,
    /// `button`
    Button,
    /// `div`
    Div,
    /// `form`
    Form,
    /// `h1`
    H1,
    /// `h2`
    H2,
    /// `h3`
    H3,
    /// `h4`
    H4,
    /// `h5`
    H5,
    /// `h6`
    H6,
    /// `head`
    Head,
    /// `hr`
    Hr,
    /// `html`
    Html,
    /// `img`
    Img,
    /// `input`
    Input,
    /// `label`
    Label,
    /// `li`
    Li,
    /// `meta`
    Meta,
    /// `ol`
    Ol,
    /// `option`
    #[strum(serialize = "option")]
    SelectOption,
    /// `p`
    #[strum(serialize = "p")]
    Paragraph,
    /// `script`
    Script,
    /// `select`
    Select,
    /// `source`
    Source,
    /// `span`
    Span,
    /// `strong`
    Strong,
    /// `style`
    Style,
    /// `table`
    Table,
    /// `tbody`
    Tbody,
    /// `td`
    Td,
    /// `template`
    Template,
    /// `textarea`
    Textarea,
    /// `th`
    Th,
    /// `thead`
    Thead,
    /// `title`
    Title,
    /// `tr`
    Tr,
    /// `ul`
    Ul,
}

impl Tag {
    /// The lowercase tag name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
    ///
    /// Void elements have a start tag only.
    #[must_use]
    pub const fn is_void(self) -> bool {
        matches!(
            self,
            Self::Br | Self::Hr | Self::Img | Self::Input | Self::Meta | Self::Source
        )
    }

    /// Attributes that must be present on this element.
    #[must_use]
    pub const fn required_attributes(self) -> &'static [&'static str] {
        match self {
            Self::Anchor => &["href"],
            Self::Html => &["lang"],
            Self::Img => &["src", "alt"],
            Self::Input => &["type"],
            Self::Label => &["for"],
            Self::SelectOption => &["value"],
            _ => &[],
        }
    }

    /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
    ///
    /// `script` and `style` are raw text elements and are never escaped.
    /// `textarea` keeps its text unindented since leading whitespace there
    /// is part of the value.
    #[must_use]
    pub const fn text_policy(self) -> TextPolicy {
        match self {
            Self::Script | Self::Style => TextPolicy::RAW,
            Self::Textarea => TextPolicy::UNINDENTED,
            _ => TextPolicy::ESCAPED,
        }
    }

    /// An empty node of this element with the right void-ness and text policy.
    #[must_use]
    pub fn node(self) -> ElementNode {
        let node = if self.is_void() {
            ElementNode::void(self.as_str())
        } else {
            ElementNode::element(self.as_str())
        };
        node.with_text_policy(self.text_policy())
    }

    /// Build a node of this element, enforcing its rules.
    ///
    /// Text attribute values are escaped with [`escape_attr_value`] on the
    /// way in, since the renderer writes values as given.
    ///
    /// # Errors
    ///
    /// [`BuildError::VoidWithContent`] if this is a void element and `text`
    /// is non-empty or `children` is non-empty;
    /// [`BuildError::MissingAttributes`] if a required attribute is absent.
    pub fn build(
        self,
        text: Option<&str>,
        children: Vec<ElementNode>,
        attributes: AttributesMap,
    ) -> Result<ElementNode, BuildError> {
        if self.is_void() && (text.is_some_and(|t| !t.is_empty()) || !children.is_empty()) {
            return Err(BuildError::VoidWithContent { tag: self });
        }
        self.check_attributes(&attributes)?;

        let attributes = attributes
            .into_iter()
            .map(|(name, value)| match value {
                AttrValue::Text(text) => (name, AttrValue::from(escape_attr_value(&text))),
                other => (name, other),
            })
            .collect();

        let mut node = self.node().with_attributes(attributes);
        if let Some(text) = text {
            node = node.with_text(text);
        }
        Ok(node.with_children(children))
    }

    /// Check an existing node against this element's rules.
    ///
    /// # Errors
    ///
    /// [`BuildError::TagMismatch`] if the node has another tag name;
    /// [`BuildError::NotVoid`] / [`BuildError::UnexpectedVoid`] if the node's
    /// void-ness disagrees with the element's; [`BuildError::VoidWithContent`]
    /// if a void node carries text; [`BuildError::MissingAttributes`] if a
    /// required attribute is absent.
    pub fn check(self, node: &ElementNode) -> Result<(), BuildError> {
        if node.tag_name() != self.as_str() {
            return Err(BuildError::TagMismatch {
                expected: self,
                found: node.tag_name().to_string(),
            });
        }
        match (self.is_void(), node.is_void()) {
            (true, false) => return Err(BuildError::NotVoid { tag: self }),
            (false, true) => return Err(BuildError::UnexpectedVoid { tag: self }),
            (true, true) if node.has_text() => {
                return Err(BuildError::VoidWithContent { tag: self });
            }
            _ => {}
        }
        self.check_attributes(node.attributes())
    }

    fn check_attributes(self, attributes: &AttributesMap) -> Result<(), BuildError> {
        let missing: Vec<&'static str> = self
            .required_attributes()
            .iter()
            .copied()
            .filter(|name| !attributes.contains_key(*name))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(BuildError::MissingAttributes { tag: self, missing })
        }
    }
}
