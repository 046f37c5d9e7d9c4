use std::{io::Write, path::PathBuf};

use clap::Args;
use eyre::{Context, Result};
use structgen_core::File;

use super::{InputArgs, open_config};
use crate::{
    ops::{self, GenerateOptions},
    reports::{GenerateReport, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub input: InputArgs,

    /// Go package name (overrides output.package)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Use sentinel wrapper types for optional fields
    #[arg(long)]
    pub use_empty_types: bool,

    /// Accept a bare `false` document as an empty value when decoding
    #[arg(long)]
    pub always_accept_false: bool,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = open_config(self.input.config.as_deref());
        let model = ops::load_model(&self.input.model)?;

        let opts = GenerateOptions {
            package: self.package.as_deref(),
            use_empty_types: self.use_empty_types,
            always_accept_false: self.always_accept_false,
        };
        let source = ops::generate(&model, config.as_ref(), &opts)?;

        match &self.output {
            Some(path) => {
                let result = File::new(path, source.as_slice())
                    .write()
                    .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
                GenerateReport {
                    path: path.clone(),
                    result,
                    bytes: source.len(),
                }
                .render(&mut TerminalOutput::new());
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&source)?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}
