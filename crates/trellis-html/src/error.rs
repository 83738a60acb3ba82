//! Errors from the checked element builder.

use thiserror::Error;

use crate::tags::Tag;

/// Why a node does not satisfy the rules of its [`Tag`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// [§ 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#elements-2)
    /// "Void elements can't have any contents."
    #[error("text and children are not allowed on void element <{tag}>")]
    VoidWithContent {
        /// The void tag.
        tag: Tag,
    },

    /// A void tag on a node that has a child list, which would render an end
    /// tag.
    #[error("<{tag}> is a void element but the node has a child list")]
    NotVoid {
        /// The void tag.
        tag: Tag,
    },

    /// A normal tag on a node without a child list, which would render no
    /// end tag.
    #[error("<{tag}> needs an end tag but the node has no child list")]
    UnexpectedVoid {
        /// The normal tag.
        tag: Tag,
    },

    /// Attributes the tag cannot do without.
    #[error("missing required attributes {missing:?} on <{tag}>")]
    MissingAttributes {
        /// The tag being built.
        tag: Tag,
        /// Names of the absent attributes, in declaration order.
        missing: Vec<&'static str>,
    },

    /// The node's tag name is not the tag it was checked against.
    #[error("node <{found}> checked against <{expected}>")]
    TagMismatch {
        /// The tag whose rules were applied.
        expected: Tag,
        /// The node's actual tag name.
        found: String,
    },
}
