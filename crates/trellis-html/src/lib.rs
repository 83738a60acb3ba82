//! Lazy HTML rendering for the Trellis HTML generator.
//!
//! # Scope
//!
//! This crate implements:
//! - **Renderer** ([`render`], [`Render`]) - turns an [`ElementNode`] tree
//!   into indented HTML one `char` at a time
//! - **Escaping** ([`escape_text`], [`escape_attr_value`])
//! - **Tag catalogue** ([`Tag`]) - void elements, required attributes, raw
//!   text elements, and a checked builder
//! - **Documents** ([`Document`]) - doctype and `html`/`head`/`body` skeleton
//! - **Byte streaming** ([`RenderReader`]) - `std::io::Read` over a render
//!
//! # Not Implemented
//!
//! - Parsing
//! - Validation beyond the rules in [`Tag`]
//!
//! [`ElementNode`]: trellis_dom::ElementNode

/// Whole-document assembly.
pub mod document;
/// Errors from the checked builder.
pub mod error;
/// Character reference escaping.
pub mod escape;
/// `std::io::Read` adapter.
pub mod reader;
/// The lazy renderer.
pub mod render;
/// Known element names and their rules.
pub mod tags;

pub use document::{DOCTYPE, Document, DocumentOptions, DocumentRender};
pub use error::BuildError;
pub use escape::{escape_attr_value, escape_text};
pub use reader::RenderReader;
pub use render::{INDENT_WIDTH, Render, RenderOptions, render, render_to_string, render_with};
pub use tags::Tag;
