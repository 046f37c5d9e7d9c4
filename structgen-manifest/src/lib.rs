//! Parsing and validation of `structgen.toml`.
//!
//! Errors carry the source text and a span so they render as rich
//! diagnostics through [`miette`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod file;
mod manifest;

pub use error::{Error, Result};
pub use file::ManifestFile;
pub use manifest::{Manifest, OutputConfig, TemplatesConfig};
