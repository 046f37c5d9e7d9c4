//! Generate command report data structures.

use std::path::PathBuf;

use structgen_core::WriteResult;

use super::output::{Output, Report};

/// Report data from writing generated source to a file.
#[derive(Debug)]
pub struct GenerateReport {
    pub path: PathBuf,
    pub result: WriteResult,
    pub bytes: usize,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        let status = match self.result {
            WriteResult::Written => "Generated",
            WriteResult::Unchanged => "Unchanged",
        };
        out.preformatted(&format!(
            "{status}: {} ({} bytes)",
            self.path.display(),
            self.bytes
        ));
    }
}
