use model::LoadError;
use thiserror::Error;

use crate::chart::BuilderError;

/// Error types for the compute module
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Error from loading the dataset
    #[error("Dataset error: {0}")]
    Load(#[from] LoadError),

    /// A chart slot that no subscriber is registered for
    #[error("Unknown chart slot: {0}")]
    UnknownSlot(String),

    /// A chart builder could not produce its spec
    #[error(transparent)]
    Builder(#[from] BuilderError),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
