use std::sync::Arc;

use super::decoder::LabelDecoder;
use super::InferenceError;
use crate::models::{ClassLabel, FeatureRow};

/// Pre-trained multi-class health model (allows mocking for tests).
///
/// Implementations are read-only after load and shared across requests.
pub trait HealthClassifier: Send + Sync {
    /// Encoded index of the predicted class.
    fn predict(&self, row: &FeatureRow) -> Result<usize, InferenceError>;

    /// Raw class probabilities, indexed like `ClassLabel::ALL`.
    fn predict_probabilities(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError>;

    /// Predicted index and probabilities for one row. Backends that produce
    /// both from a single run override this.
    fn predict_with_probabilities(
        &self,
        row: &FeatureRow,
    ) -> Result<(usize, Vec<f64>), InferenceError> {
        Ok((self.predict(row)?, self.predict_probabilities(row)?))
    }

    /// Short artifact kind for logs.
    fn kind(&self) -> &'static str;
}

/// A classifier together with the decoder it was fitted with.
pub struct LoadedModel {
    pub classifier: Box<dyn HealthClassifier>,
    pub decoder: LabelDecoder,
}

impl LoadedModel {
    pub fn new(classifier: Box<dyn HealthClassifier>, decoder: LabelDecoder) -> Self {
        Self {
            classifier,
            decoder,
        }
    }
}

/// Outcome of the one-time model load. Never changes after startup.
#[derive(Clone)]
pub enum ModelAvailability {
    Loaded(Arc<LoadedModel>),
    Unavailable { reason: String },
}

impl ModelAvailability {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}

/// What the classifier said, before reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPrediction {
    /// Decoded discrete prediction; `None` when the decoder has no entry
    /// for the predicted index.
    pub raw_label: Option<ClassLabel>,
    pub distribution: Vec<f64>,
}

/// Runs the loaded model on one feature row.
#[derive(Clone)]
pub struct ClassifierAdapter {
    model: ModelAvailability,
}

impl ClassifierAdapter {
    pub fn new(model: ModelAvailability) -> Self {
        Self { model }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_loaded()
    }

    /// One class prediction plus one probability vector. Fails fast when the
    /// model never loaded.
    pub fn infer(&self, row: &FeatureRow) -> Result<RawPrediction, InferenceError> {
        let model = match &self.model {
            ModelAvailability::Loaded(model) => model,
            ModelAvailability::Unavailable { reason } => {
                return Err(InferenceError::ModelUnavailable(reason.clone()));
            }
        };

        let (index, distribution) = model.classifier.predict_with_probabilities(row)?;

        let raw_label = model.decoder.decode(index);
        if raw_label.is_none() {
            tracing::warn!(
                index,
                model = model.classifier.kind(),
                "Predicted index has no decoder entry"
            );
        }

        Ok(RawPrediction {
            raw_label,
            distribution,
        })
    }
}

/// Deterministic classifier returning a fixed answer, for tests and demos.
pub struct StubClassifier {
    pub predicted_index: usize,
    pub probabilities: Vec<f64>,
}

impl HealthClassifier for StubClassifier {
    fn predict(&self, _row: &FeatureRow) -> Result<usize, InferenceError> {
        Ok(self.predicted_index)
    }

    fn predict_probabilities(&self, _row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        Ok(self.probabilities.clone())
    }

    fn kind(&self) -> &'static str {
        "stub"
    }
}
