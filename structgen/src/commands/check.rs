use clap::Args;
use eyre::Result;

use super::{InputArgs, open_config};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub input: InputArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = open_config(self.input.config.as_deref());
        let model = ops::load_model(&self.input.model)?;

        let report = ops::check(&self.input.model, &model, config.as_ref());
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
