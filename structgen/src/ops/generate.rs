//! Generate operation - Go source from a model.

use eyre::{Context, Result, bail, eyre};
use structgen_codegen::{GoTemplates, JinjaTemplates, OutputOptions, Templates, output};
use structgen_core::clean_package_name;
use structgen_ir::SchemaModel;
use structgen_manifest::{Manifest, ManifestFile};

/// Command-line overrides applied on top of structgen.toml.
#[derive(Debug, Default)]
pub struct GenerateOptions<'a> {
    /// Package name; replaces `output.package`.
    pub package: Option<&'a str>,
    /// Forces sentinel substitution on.
    pub use_empty_types: bool,
    /// Forces the bare-`false` decoding on.
    pub always_accept_false: bool,
}

/// Merge the manifest (if any) with command-line overrides.
pub fn output_options(manifest: Option<&Manifest>, opts: &GenerateOptions) -> Result<OutputOptions> {
    let package = opts
        .package
        .map(str::to_string)
        .or_else(|| manifest.map(|m| m.output.package.clone()))
        .ok_or_else(|| eyre!("No package name: pass --package or set output.package in structgen.toml"))?;

    if clean_package_name(&package).is_empty() {
        bail!("Package name '{package}' is empty once '.', '_' and '-' are removed");
    }

    let mut options = OutputOptions::new(package)
        .use_empty_types(opts.use_empty_types || manifest.is_some_and(|m| m.output.use_empty_types))
        .always_accept_false(
            opts.always_accept_false || manifest.is_some_and(|m| m.output.always_accept_false),
        );
    if let Some(manifest) = manifest {
        options = options.empty_types(manifest.empty_types());
    }
    Ok(options)
}

/// Jinja templates when the config names them, the Go renderer otherwise.
pub fn templates(config: Option<&ManifestFile>) -> Result<Box<dyn Templates>> {
    match config.and_then(ManifestFile::templates) {
        Some(paths) => {
            let templates = JinjaTemplates::from_files(&paths.header, &paths.body)
                .wrap_err("Failed to load templates")?;
            Ok(Box::new(templates))
        }
        None => Ok(Box::new(GoTemplates::new())),
    }
}

/// Execute the generate operation and return the generated source.
pub fn generate(
    model: &SchemaModel,
    config: Option<&ManifestFile>,
    opts: &GenerateOptions,
) -> Result<Vec<u8>> {
    let options = output_options(config.map(ManifestFile::manifest), opts)?;
    let templates = templates(config)?;

    let mut source = Vec::new();
    output(&mut source, model, templates.as_ref(), &options).wrap_err("Failed to generate code")?;
    Ok(source)
}
