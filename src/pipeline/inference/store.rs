//! One-time loading of the classifier artifacts from the model directory.

use std::path::Path;
use std::sync::Arc;

use super::classifier::{HealthClassifier, LoadedModel, ModelAvailability};
use super::decoder::LabelDecoder;
use super::linear::LinearSoftmaxModel;
use super::ModelLoadError;

pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";
pub const LINEAR_MODEL_FILE: &str = "classifier.json";
pub const ONNX_MODEL_FILE: &str = "classifier.onnx";

/// Load the decoder and classifier from `model_dir`.
///
/// `classifier.onnx` is used when the `onnx-classifier` feature is enabled
/// and the file exists; otherwise `classifier.json`.
pub fn try_load_model(model_dir: &Path) -> Result<LoadedModel, ModelLoadError> {
    let decoder = LabelDecoder::load(&model_dir.join(LABEL_ENCODER_FILE))?;
    let classifier = load_classifier(model_dir)?;
    tracing::info!(
        dir = %model_dir.display(),
        model = classifier.kind(),
        "Health model loaded"
    );
    Ok(LoadedModel::new(classifier, decoder))
}

/// Startup entry point. A failure is logged once and becomes the permanent
/// state for the process; requests never retry the load.
pub fn load_model(model_dir: &Path) -> ModelAvailability {
    match try_load_model(model_dir) {
        Ok(model) => ModelAvailability::Loaded(Arc::new(model)),
        Err(e) => {
            tracing::error!(
                dir = %model_dir.display(),
                error = %e,
                "Health model failed to load; analysis requests will be refused"
            );
            ModelAvailability::unavailable(e.to_string())
        }
    }
}

fn load_classifier(model_dir: &Path) -> Result<Box<dyn HealthClassifier>, ModelLoadError> {
    #[cfg(feature = "onnx-classifier")]
    {
        let onnx_path = model_dir.join(ONNX_MODEL_FILE);
        if onnx_path.exists() {
            return Ok(Box::new(super::onnx::OnnxClassifier::load(&onnx_path)?));
        }
    }

    let linear_path = model_dir.join(LINEAR_MODEL_FILE);
    if !linear_path.exists() && model_dir.join(ONNX_MODEL_FILE).exists() {
        tracing::warn!(
            "Found {ONNX_MODEL_FILE} but this build lacks the onnx-classifier feature"
        );
    }
    Ok(Box::new(LinearSoftmaxModel::load(&linear_path)?))
}
