//! Code generation bookkeeping.
//!
//! - [`ImportRegistry`] - Import path registration and aliasing

mod imports;

pub use imports::ImportRegistry;
