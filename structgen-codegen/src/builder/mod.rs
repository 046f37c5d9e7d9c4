//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Tab-indented line builder for Go source

mod code_builder;

pub use code_builder::CodeBuilder;
