pub mod classifier;
pub mod decoder;
pub mod linear;
#[cfg(feature = "onnx-classifier")]
pub mod onnx;
pub mod reconcile;
pub mod store;

pub use classifier::*;
pub use decoder::*;
pub use reconcile::*;
pub use store::*;

use std::path::PathBuf;

use thiserror::Error;

/// Failures while running a loaded classifier or interpreting its output.
#[derive(Error, Debug, PartialEq)]
pub enum InferenceError {
    #[error("Health model not loaded: {0}")]
    ModelUnavailable(String),

    #[error("Degenerate probability distribution: {0}")]
    DegenerateDistribution(String),

    #[error("Classifier failed: {0}")]
    Classifier(String),
}

/// Failures while loading model artifacts at startup.
#[derive(Error, Debug)]
pub enum ModelLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact not found at: {0}")]
    NotFound(PathBuf),

    #[error("Malformed artifact JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidArtifact(String),

    #[error("Model runtime initialization failed: {0}")]
    Runtime(String),
}
