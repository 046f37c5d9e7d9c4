//! Check command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from model and config validation.
#[derive(Debug)]
pub struct CheckReport {
    pub model_path: PathBuf,
    /// Config file in use, if any.
    pub config_path: Option<PathBuf>,
    /// Sanitized package name, if one could be resolved.
    pub package: Option<String>,
    /// `go` or `jinja`.
    pub renderer: &'static str,
    pub structs: usize,
    pub aliases: usize,
    pub one_ofs: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for error in &self.errors {
            out.error(error);
        }
        for warning in &self.warnings {
            out.warning(warning);
        }
        if !self.is_valid() {
            return;
        }
        if !self.warnings.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid\n", self.model_path.display()));
        if let Some(config) = &self.config_path {
            out.key_value_indented("config", &config.display().to_string());
        }
        if let Some(package) = &self.package {
            out.key_value_indented("package", package);
        }
        out.key_value_indented("renderer", self.renderer);
        out.key_value_indented("structs", &self.structs.to_string());
        out.key_value_indented("aliases", &self.aliases.to_string());
        out.key_value_indented("one-ofs", &self.one_ofs.to_string());
    }
}
