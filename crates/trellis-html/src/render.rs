//! Lazy, character-at-a-time rendering of an element tree.
//!
//! [§ 13.1 Writing HTML documents](https://html.spec.whatwg.org/multipage/syntax.html#writing)
//!
//! # Output shape
//!
//! Every tag sits on its own line, indented by `indent_width` spaces per
//! level of nesting:
//!
//! ```text
//! <div id="x">
//!   hi
//! </div>
//! ```
//!
//! - A void element (`children` is `None`) is one line with no end tag.
//! - Text, when present and non-empty, is one level deeper than the tags and
//!   wins over children.
//! - Otherwise each child is rendered one level deeper, in order.
//!
//! # Laziness
//!
//! [`Render`] produces one `char` per call to `next`. Nothing is formatted
//! ahead of time: the iterator keeps an explicit stack of open elements, each
//! with the stage it has reached, plus the piece of text currently being
//! copied out. Stopping early costs nothing, and a fresh [`render`] call on
//! the same tree starts over from scratch.

use std::borrow::Cow;
use std::iter::FusedIterator;
use std::str::Chars;

use trellis_common::warning::warn_once;
use trellis_dom::{AttrValue, ElementNode, TextPolicy};

use crate::escape::text_entity;

/// Spaces per nesting level.
pub const INDENT_WIDTH: usize = 2;

/// Rendering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: INDENT_WIDTH,
        }
    }
}

/// Render `node` and its descendants, starting at nesting level `depth`.
///
/// ```
/// use trellis_dom::ElementNode;
/// use trellis_html::render;
///
/// let node = ElementNode::element("div").with_attr("id", "x").with_text("hi");
/// let html: String = render(&node, 1).collect();
/// assert_eq!(html, "  <div id=\"x\">\n    hi\n  </div>\n");
/// ```
#[must_use]
pub fn render(node: &ElementNode, depth: usize) -> Render<'_> {
    render_with(node, depth, RenderOptions::default())
}

/// [`render`] with explicit options.
#[must_use]
pub fn render_with(node: &ElementNode, depth: usize, options: RenderOptions) -> Render<'_> {
    Render {
        stack: vec![Frame::new(node, depth)],
        segment: Segment::Empty,
        indent_width: options.indent_width,
    }
}

/// Drain a depth-0 render of `node` into a `String`.
#[must_use]
pub fn render_to_string(node: &ElementNode) -> String {
    render(node, 0).collect()
}

/// The lazy character sequence for one element tree.
///
/// Single pass: once drained it stays empty. Call [`render`] again for a new
/// sequence.
pub struct Render<'a> {
    /// Open elements, innermost last.
    stack: Vec<Frame<'a>>,
    /// The piece currently being copied out.
    segment: Segment<'a>,
    indent_width: usize,
}

impl Render<'_> {
    /// Number of elements the traversal is currently inside.
    ///
    /// Zero once the sequence is finished.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl Iterator for Render<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.segment.next() {
                return Some(c);
            }

            let frame = self.stack.last_mut()?;
            match frame.step(self.indent_width) {
                Step::Emit(segment) => self.segment = segment,
                Step::Descend(child) => {
                    let depth = frame.depth.saturating_add(1);
                    self.stack.push(Frame::new(child, depth));
                }
                Step::Finish => {
                    let _ = self.stack.pop();
                }
            }
        }
    }
}

impl FusedIterator for Render<'_> {}

/// Where a frame is within its element's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Indent,
    OpenTag,
    OpenTagName,
    Attr(usize, AttrPart),
    OpenTagEnd,
    Content,
    Child(usize),
    CloseIndent,
    CloseTag,
    CloseTagName,
    CloseTagEnd,
    Done,
}

/// ` name="value"`, piece by piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrPart {
    Space,
    Name,
    Equals,
    Value,
    Quote,
}

enum Step<'a> {
    Emit(Segment<'a>),
    Descend(&'a ElementNode),
    Finish,
}

struct Frame<'a> {
    node: &'a ElementNode,
    depth: usize,
    stage: Stage,
}

impl<'a> Frame<'a> {
    const fn new(node: &'a ElementNode, depth: usize) -> Self {
        Self {
            node,
            depth,
            stage: Stage::Indent,
        }
    }

    /// Advance to the next piece of output for this element.
    fn step(&mut self, indent_width: usize) -> Step<'a> {
        let node = self.node;
        loop {
            match self.stage {
                Stage::Indent => {
                    self.stage = Stage::OpenTag;
                    return Step::Emit(Segment::Spaces(self.depth.saturating_mul(indent_width)));
                }
                Stage::OpenTag => {
                    self.stage = Stage::OpenTagName;
                    return Step::Emit(Segment::str("<"));
                }
                Stage::OpenTagName => {
                    self.stage = Stage::Attr(0, AttrPart::Space);
                    return Step::Emit(Segment::str(node.tag_name()));
                }
                Stage::Attr(index, part) => {
                    let Some((name, value)) = node.attributes().get_index(index) else {
                        self.stage = Stage::OpenTagEnd;
                        continue;
                    };
                    let (next, segment) = match part {
                        AttrPart::Space => (AttrPart::Name, Segment::str(" ")),
                        AttrPart::Name => (AttrPart::Equals, Segment::str(name)),
                        AttrPart::Equals => (AttrPart::Value, Segment::str("=\"")),
                        AttrPart::Value => (AttrPart::Quote, Segment::value(value)),
                        AttrPart::Quote => {
                            self.stage = Stage::Attr(index + 1, AttrPart::Space);
                            return Step::Emit(Segment::str("\""));
                        }
                    };
                    self.stage = Stage::Attr(index, next);
                    return Step::Emit(segment);
                }
                Stage::OpenTagEnd => {
                    self.stage = if node.is_void() {
                        if node.has_text() {
                            warn_once(
                                "Render",
                                &format!("text ignored on void element <{}>", node.tag_name()),
                            );
                        }
                        Stage::Done
                    } else {
                        Stage::Content
                    };
                    return Step::Emit(Segment::str(">\n"));
                }
                Stage::Content => match node.text().filter(|t| !t.is_empty()) {
                    Some(text) => {
                        if node.children().is_some_and(|c| !c.is_empty()) {
                            warn_once(
                                "Render",
                                &format!("children of <{}> ignored because it has text", node.tag_name()),
                            );
                        }
                        self.stage = Stage::CloseIndent;
                        let indent = self.depth.saturating_add(1).saturating_mul(indent_width);
                        return Step::Emit(Segment::Text(TextCursor::new(
                            text,
                            node.text_policy(),
                            indent,
                        )));
                    }
                    None => self.stage = Stage::Child(0),
                },
                Stage::Child(index) => {
                    match node.children().and_then(|children| children.get(index)) {
                        Some(child) => {
                            self.stage = Stage::Child(index + 1);
                            return Step::Descend(child);
                        }
                        None => self.stage = Stage::CloseIndent,
                    }
                }
                Stage::CloseIndent => {
                    self.stage = Stage::CloseTag;
                    return Step::Emit(Segment::Spaces(self.depth.saturating_mul(indent_width)));
                }
                Stage::CloseTag => {
                    self.stage = Stage::CloseTagName;
                    return Step::Emit(Segment::str("</"));
                }
                Stage::CloseTagName => {
                    self.stage = Stage::CloseTagEnd;
                    return Step::Emit(Segment::str(node.tag_name()));
                }
                Stage::CloseTagEnd => {
                    self.stage = Stage::Done;
                    return Step::Emit(Segment::str(">\n"));
                }
                Stage::Done => return Step::Finish,
            }
        }
    }
}

/// A run of output characters.
enum Segment<'a> {
    Empty,
    Spaces(usize),
    Borrowed(Chars<'a>),
    /// Attribute values that had to be converted to text.
    Owned { text: String, pos: usize },
    Text(TextCursor<'a>),
}

impl<'a> Segment<'a> {
    fn str(s: &'a str) -> Self {
        Self::Borrowed(s.chars())
    }

    /// Attribute values are turned into text only once the traversal
    /// reaches them.
    fn value(value: &'a AttrValue) -> Self {
        match value.as_text() {
            Cow::Borrowed(s) => Self::str(s),
            Cow::Owned(text) => Self::Owned { text, pos: 0 },
        }
    }
}

impl Iterator for Segment<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            Self::Empty | Self::Spaces(0) => None,
            Self::Spaces(n) => {
                *n -= 1;
                Some(' ')
            }
            Self::Borrowed(chars) => chars.next(),
            Self::Owned { text, pos } => {
                let c = text[*pos..].chars().next()?;
                *pos += c.len_utf8();
                Some(c)
            }
            Self::Text(cursor) => cursor.next(),
        }
    }
}

/// Copies an element's text out, escaping and re-indenting as it goes, and
/// finishes with the newline that ends the text line.
struct TextCursor<'a> {
    chars: Chars<'a>,
    /// Remainder of a character reference being written.
    reference: Chars<'static>,
    escape: bool,
    /// Indentation written after each embedded newline.
    continuation: Option<usize>,
    /// Spaces still owed before the next text character.
    pad: usize,
    finished: bool,
}

impl<'a> TextCursor<'a> {
    fn new(text: &'a str, policy: TextPolicy, indent: usize) -> Self {
        Self {
            chars: text.chars(),
            reference: "".chars(),
            escape: policy.escape,
            continuation: policy.indent.then_some(indent),
            pad: if policy.indent { indent } else { 0 },
            finished: false,
        }
    }
}

impl Iterator for TextCursor<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.pad > 0 {
            self.pad -= 1;
            return Some(' ');
        }
        if let Some(c) = self.reference.next() {
            return Some(c);
        }
        match self.chars.next() {
            Some(c) => {
                if self.escape {
                    if let Some(reference) = text_entity(c) {
                        self.reference = reference.chars();
                        return self.reference.next();
                    }
                }
                if c == '\n' {
                    if let Some(width) = self.continuation {
                        self.pad = width;
                    }
                }
                Some(c)
            }
            None if !self.finished => {
                self.finished = true;
                Some('\n')
            }
            None => None,
        }
    }
}
