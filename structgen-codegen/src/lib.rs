//! Rendering context assembly and source rendering for structgen.
//!
//! Turns an unordered [`SchemaModel`](structgen_ir::SchemaModel) into a
//! deterministic [`OutputData`] and renders it in two passes: the body first,
//! which registers every import it references, then the header, which lists
//! those imports.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented code building ([`CodeBuilder`](builder::CodeBuilder))
//! - [`generation`] - Import tracking ([`ImportRegistry`](generation::ImportRegistry))
//! - [`render`] - The [`Templates`] trait plus the Go and Jinja renderers
//! - [`output`](mod@output) - Context assembly and the [`output()`] entry point

pub mod builder;
mod error;
pub mod generation;
pub mod output;
pub mod render;

pub use error::{Error, Result};
pub use output::{OutputData, OutputOptions, output, substitute_empty_types};
pub use render::{GoTemplates, JinjaTemplates, Stage, Templates};
