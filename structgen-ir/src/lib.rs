//! Schema model types for the structgen emitter.
//!
//! These are the values an upstream schema parser hands to code generation:
//! named structs with typed fields, type aliases and one-of groups.
//!
//! # Architecture
//!
//! ```text
//! schema document → (external parser) → SchemaModel → structgen-codegen → Go source
//! ```
//!
//! The model is plain data with serde support so it can be exchanged as JSON
//! between the parser and the emitter.

mod model;

pub use model::{Field, OneOf, SchemaModel, Struct};
