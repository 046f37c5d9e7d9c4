//! Template stage.
//!
//! A [`Templates`] implementation supplies the two passes of a generated
//! file. The body pass receives `&mut OutputData` so it can register
//! imports; the header pass only reads the finished registry.

mod go;
mod jinja;

use std::fmt;

pub use go::GoTemplates;
pub use jinja::JinjaTemplates;

use crate::{OutputData, Result};

/// Which pass of the render is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Header,
    Body,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Header => "header",
            Stage::Body => "body",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Header and body templates for one generated file.
pub trait Templates {
    /// Render everything after the header, registering imports on `data`.
    fn render_body(&self, data: &mut OutputData) -> Result<String>;

    /// Render the package clause and import block.
    fn render_header(&self, data: &OutputData) -> Result<String>;
}
