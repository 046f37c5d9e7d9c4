//! Core utilities and types for the structgen emitter.
//!
//! This crate provides the small, total building blocks that code generation
//! relies on for reproducible output.

mod empty_types;
mod file;
mod utils;

// Sentinel wrapper table
pub use empty_types::EmptyTypes;
// File operations
pub use file::{File, WriteResult};
// String utilities
pub use utils::{clean_package_name, sorted_keys};
