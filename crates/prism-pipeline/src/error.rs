use prism_core::ResolveError;
use prism_schema::ConfigError;
use prism_scale::ScaleError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before any output is produced.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("token source directory {} does not exist", .0.display())]
    SourceMissing(PathBuf),
    #[error("failed to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },
    #[error(transparent)]
    Data(#[from] prism_data::DataError),
}

/// Why one color family produced no scale.
#[derive(Error, Debug)]
pub enum FamilyError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("anchor `{anchor}` does not resolve: {source}")]
    Anchor {
        anchor: String,
        #[source]
        source: ResolveError,
    },
    #[error(transparent)]
    Scale(#[from] ScaleError),
}

#[derive(Error, Debug)]
#[error("failed to write {}: {message}", path.display())]
pub struct WriteError {
    pub path: PathBuf,
    pub message: String,
}
