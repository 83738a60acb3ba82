//! Character reference escaping.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html)
//!
//! Every replacement is chosen from the source character alone, one source
//! character at a time, so an `&` produced by an earlier replacement is never
//! seen again and nothing is escaped twice.

use std::borrow::Cow;

/// The reference that replaces `c` in text content, if any.
pub(crate) const fn text_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        _ => None,
    }
}

const fn attr_entity(c: char) -> Option<&'static str> {
    match c {
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

fn escape_with(input: &str, entity: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = input.find(|c| entity(c).is_some()) else {
        return Cow::Borrowed(input);
    };

    let mut out = String::with_capacity(input.len() + 8);
    out.push_str(&input[..first]);
    for c in input[first..].chars() {
        match entity(c) {
            Some(reference) => out.push_str(reference),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escape `&`, `<` and `>` in text content.
///
/// This is the eager form of what the renderer does lazily for escaped text.
///
/// ```
/// use trellis_html::escape_text;
///
/// assert_eq!(escape_text("a & <b>"), "a &amp; &lt;b&gt;");
/// assert_eq!(escape_text("plain"), "plain");
/// ```
#[must_use]
pub fn escape_text(text: &str) -> Cow<'_, str> {
    escape_with(text, text_entity)
}

/// Escape `&` and `"` for use inside a double-quoted attribute value.
///
/// The renderer writes attribute values verbatim; producers of untrusted
/// values run them through this first.
#[must_use]
pub fn escape_attr_value(value: &str) -> Cow<'_, str> {
    escape_with(value, attr_entity)
}
