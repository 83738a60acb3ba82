//! Attribute values and attribute-name decoding.
//!
//! [§ 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
//!
//! Values are held as [`AttrValue`], which is the only thing the renderer
//! knows how to turn into text. Names arrive already decoded; the
//! identifier-to-attribute-name convention lives in [`decode_attr_name`] and
//! the [`attrs!`](crate::attrs) macro, never in the renderer.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered map of attribute names to values for an element.
///
/// Insertion order is render order.
pub type AttributesMap = IndexMap<String, AttrValue>;

/// A value that can be written between the quotes of an attribute.
///
/// Any type with a `From` conversion into `AttrValue` can be passed where an
/// attribute value is expected; anything else is rejected by the compiler.
/// From JSON, `null`, arrays and objects fail to deserialize.
///
/// Floats that are not finite are held as [`AttrValue::Text`], since JSON
/// cannot carry them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// `true` / `false`
    Bool(bool),
    /// Whole numbers, written in decimal.
    Integer(i64),
    /// Whole numbers above `i64::MAX`.
    Unsigned(u64),
    /// Finite floating point numbers, written with Rust's shortest
    /// round-trip form.
    Float(f64),
    /// Text, written as-is.
    Text(String),
}

impl AttrValue {
    /// The display text of this value, borrowing when it is already text.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(s) => Cow::Borrowed(s),
            other => Cow::Owned(other.to_string()),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Unsigned(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for AttrValue {
    fn from(value: Cow<'_, str>) -> Self {
        Self::Text(value.into_owned())
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! integer_attr_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    Self::Integer(i64::from(value))
                }
            }
        )*
    };
}

integer_attr_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Self::Unsigned(value), Self::Integer)
    }
}

impl From<usize> for AttrValue {
    fn from(value: usize) -> Self {
        u64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::from)
    }
}

impl From<isize> for AttrValue {
    fn from(value: isize) -> Self {
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        // JSON has no NaN or infinity; keep the written form instead.
        if value.is_finite() {
            Self::Float(value)
        } else {
            Self::Text(value.to_string())
        }
    }
}

/// Decode an identifier-style key into an HTML attribute name.
///
/// Identifiers cannot spell every attribute name (`data-count`, or `type`
/// which is a Rust keyword), so keys follow a small convention:
///
/// - a leading `r#` is dropped (`r#type` → `type`);
/// - a leading `_` is dropped, and then every remaining `_` becomes `-`
///   (`_class` → `class`, `_data_count` → `data-count`);
/// - any other key is returned unchanged (`-_a_b` → `-_a_b`).
#[must_use]
pub fn decode_attr_name(key: &str) -> String {
    let key = key.strip_prefix("r#").unwrap_or(key);
    key.strip_prefix('_')
        .map_or_else(|| key.to_string(), |rest| rest.replace('_', "-"))
}

/// Build an [`AttributesMap`] from identifier-style keys.
///
/// Keys go through [`decode_attr_name`]; values through
/// [`AttrValue::from`]. Order is preserved.
///
/// ```
/// use trellis_dom::{attrs, AttrValue};
///
/// let map = attrs! { _class = "box", _data_count = 3, r#type = "text" };
/// let names: Vec<&str> = map.keys().map(String::as_str).collect();
/// assert_eq!(names, ["class", "data-count", "type"]);
/// assert_eq!(map["data-count"], AttrValue::Integer(3));
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::AttributesMap::new()
    };
    ($($key:ident = $value:expr),+ $(,)?) => {{
        let mut map = $crate::AttributesMap::new();
        $(
            let _ = map.insert(
                $crate::decode_attr_name(stringify!($key)),
                $crate::AttrValue::from($value),
            );
        )+
        map
    }};
}
