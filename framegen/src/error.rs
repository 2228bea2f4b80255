//! Error taxonomy for a generation run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type GenResult<T> = Result<T, GenError>;

#[derive(Error, Debug)]
pub enum GenError {
    /// A template referenced a variable the render context does not define.
    #[error("missing variable `{name}` in template `{template}`")]
    MissingVariable { template: String, name: String },

    /// An output path matched no allowlist prefix.
    #[error("path not allowed: {0}")]
    PathNotAllowed(String),

    #[error("write failed: {}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown template: {0}")]
    UnknownTemplate(String),

    #[error("template `{name}` is invalid")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// A template override exists on disk but could not be read.
    #[error("read template override {}", path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GenError {
    /// Short, stable name of the error kind for reporting.
    pub fn kind(&self) -> &'static str {
        match self {
            GenError::MissingVariable { .. } => "MissingVariable",
            GenError::PathNotAllowed(_) => "PathNotAllowed",
            GenError::WriteFailed { .. } => "WriteFailed",
            GenError::UnknownTemplate(_) => "UnknownTemplate",
            GenError::Template { .. } => "Template",
            GenError::TemplateLoad { .. } => "TemplateLoad",
        }
    }
}
