use std::path::PathBuf;

use thiserror::Error;

use crate::Stage;

/// Result type for code generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by a template implementation.
pub type TemplateError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// A template failed while rendering; nothing was written.
    #[error("failed to render {stage} template")]
    Render {
        stage: Stage,
        #[source]
        source: TemplateError,
    },

    /// A template could not be compiled.
    #[error("invalid {stage} template")]
    InvalidTemplate {
        stage: Stage,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to read {stage} template '{path}'")]
    ReadTemplate {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write generated source")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a template failure for the given pass.
    pub fn render(stage: Stage, source: impl Into<TemplateError>) -> Self {
        Self::Render {
            stage,
            source: source.into(),
        }
    }

    /// The pass that failed, if the error came from a template.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Render { stage, .. }
            | Self::InvalidTemplate { stage, .. }
            | Self::ReadTemplate { stage, .. } => Some(*stage),
            Self::Io(_) => None,
        }
    }
}
