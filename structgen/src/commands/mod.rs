mod check;
mod completions;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use structgen_manifest::ManifestFile;

/// Config file picked up from the working directory when `--config` is not given.
const DEFAULT_CONFIG: &str = "structgen.toml";

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for structgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

/// Open `--config` when given, otherwise `./structgen.toml` if it exists.
fn open_config(config: Option<&Path>) -> Option<ManifestFile> {
    match config {
        Some(path) => Some(ManifestFile::open(path).unwrap_or_exit()),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            Some(ManifestFile::open(DEFAULT_CONFIG).unwrap_or_exit())
        }
        None => None,
    }
}

#[derive(Parser)]
#[command(name = "structgen")]
#[command(version)]
#[command(about = "Generate Go struct definitions from a JSON schema model")]
pub(crate) struct Cli {
    /// Show debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Go source from a model
    Generate(GenerateCommand),

    /// Load the model and config without generating code
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

/// Arguments shared by commands that read a model and a config file.
#[derive(clap::Args)]
pub struct InputArgs {
    /// Path to the model JSON
    #[arg(short, long)]
    pub model: PathBuf,

    /// Path to structgen.toml (defaults to ./structgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
