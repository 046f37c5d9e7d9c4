//! Core operations.
//!
//! This module contains the business logic for structgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;

use std::path::Path;

use eyre::{Context, Result};
use structgen_ir::SchemaModel;
use tracing::debug;

pub use check::check;
pub use generate::{GenerateOptions, generate};

/// Read and deserialize a model JSON file.
pub fn load_model(path: &Path) -> Result<SchemaModel> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read model '{}'", path.display()))?;
    let model: SchemaModel = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Invalid model '{}'", path.display()))?;

    debug!(
        path = %path.display(),
        structs = model.structs.len(),
        aliases = model.aliases.len(),
        one_ofs = model.one_ofs.len(),
        "loaded model"
    );
    Ok(model)
}
