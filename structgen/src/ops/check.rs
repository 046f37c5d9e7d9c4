//! Check operation - load everything a generate would need, render nothing.

use std::path::Path;

use structgen_core::clean_package_name;
use structgen_ir::SchemaModel;
use structgen_manifest::ManifestFile;

use super::generate::{GenerateOptions, output_options, templates};
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Resolves the package name and templates exactly as `generate` would and
/// flags one-of variants that name no struct or alias in the model.
pub fn check(model_path: &Path, model: &SchemaModel, config: Option<&ManifestFile>) -> CheckReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let manifest = config.map(ManifestFile::manifest);
    let package = match output_options(manifest, &GenerateOptions::default()) {
        Ok(options) => Some(clean_package_name(&options.package_name)),
        Err(e) => {
            errors.push(e.to_string());
            None
        }
    };

    let renderer = if config.and_then(ManifestFile::templates).is_some() {
        "jinja"
    } else {
        "go"
    };
    if let Err(e) = templates(config) {
        errors.push(format!("{e:#}"));
    }

    let mut one_ofs: Vec<_> = model.one_ofs.values().collect();
    one_ofs.sort_by(|a, b| a.name.cmp(&b.name));
    for one_of in one_ofs {
        for variant in &one_of.variants {
            if !model.structs.contains_key(variant) && !model.aliases.contains_key(variant) {
                warnings.push(format!(
                    "one_of {}: variant '{variant}' is not defined in the model",
                    one_of.name
                ));
            }
        }
    }

    CheckReport {
        model_path: model_path.to_path_buf(),
        config_path: config.map(|c| c.path().to_path_buf()),
        package,
        renderer,
        structs: model.structs.len(),
        aliases: model.aliases.len(),
        one_ofs: model.one_ofs.len(),
        errors,
        warnings,
    }
}
