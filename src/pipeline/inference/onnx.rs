//! ONNX Runtime classifier, behind the `onnx-classifier` feature.
//!
//! Expects a converted gradient-boosting or linear model with one float
//! input of shape `[1, 24]` and two outputs: the predicted label (int64) and
//! the class probabilities (float, `[1, 6]`, no ZipMap).

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::classifier::HealthClassifier;
use super::{InferenceError, ModelLoadError};
use crate::models::{FeatureRow, BIOMARKER_COUNT, CLASS_COUNT};

/// Uses interior mutability (Mutex) because ort::Session::run requires `&mut self`
/// but `HealthClassifier` exposes `&self` for shared read-only use.
pub struct OnnxClassifier {
    session: Mutex<Session>,
}

impl OnnxClassifier {
    pub fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::NotFound(model_path.to_path_buf()));
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ModelLoadError::Runtime(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ModelLoadError::Runtime(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e: ort::Error| ModelLoadError::Runtime(format!("ONNX load failed: {e}")))?;

        tracing::info!(path = %model_path.display(), "ONNX classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
        })
    }

    fn run(&self, row: &FeatureRow) -> Result<(usize, Vec<f64>), InferenceError> {
        use ort::value::TensorRef;

        let features = row.to_f32();
        if features.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::Classifier(
                "biomarker value outside single-precision range".to_string(),
            ));
        }
        let input = ndarray::Array2::from_shape_vec((1, BIOMARKER_COUNT), features)
            .map_err(|e| InferenceError::Classifier(e.to_string()))?;
        let input_tensor = TensorRef::from_array_view(&input)
            .map_err(|e| InferenceError::Classifier(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Classifier("Session lock poisoned".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError::Classifier(format!("ONNX inference failed: {e}")))?;

        let (_, labels) = outputs[0]
            .try_extract_tensor::<i64>()
            .map_err(|e| InferenceError::Classifier(format!("Label extraction: {e}")))?;
        let label = labels
            .first()
            .copied()
            .ok_or_else(|| InferenceError::Classifier("Empty label output".to_string()))?;

        let (shape, probs) = outputs[1]
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Classifier(format!("Probability extraction: {e}")))?;

        if shape.len() != 2 || shape[1] as usize != CLASS_COUNT {
            return Err(InferenceError::Classifier(format!(
                "Unexpected probability shape: {shape:?}, expected [1, {CLASS_COUNT}]"
            )));
        }

        let index = usize::try_from(label)
            .map_err(|_| InferenceError::Classifier(format!("Negative class index {label}")))?;

        Ok((index, probs.iter().map(|&p| p as f64).collect()))
    }
}

impl HealthClassifier for OnnxClassifier {
    fn predict(&self, row: &FeatureRow) -> Result<usize, InferenceError> {
        self.run(row).map(|(index, _)| index)
    }

    fn predict_probabilities(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        self.run(row).map(|(_, probs)| probs)
    }

    /// Both outputs come from one session run.
    fn predict_with_probabilities(
        &self,
        row: &FeatureRow,
    ) -> Result<(usize, Vec<f64>), InferenceError> {
        self.run(row)
    }

    fn kind(&self) -> &'static str {
        "onnx"
    }
}
