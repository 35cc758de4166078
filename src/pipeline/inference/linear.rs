//! Multinomial linear model stored as JSON.
//!
//! `logits = W · x + b`, probabilities are the softmax of the logits and the
//! predicted class is the logit argmax. Rows of `weights` follow the encoded
//! class order; columns follow the biomarker schema.

use std::path::Path;

use serde::Deserialize;

use super::classifier::HealthClassifier;
use super::{InferenceError, ModelLoadError};
use crate::models::{FeatureRow, BIOMARKER_COUNT, CLASS_COUNT};

#[derive(Debug, Clone, Deserialize)]
pub struct LinearSoftmaxModel {
    weights: Vec<[f64; BIOMARKER_COUNT]>,
    intercepts: Vec<f64>,
}

impl LinearSoftmaxModel {
    pub fn new(
        weights: Vec<[f64; BIOMARKER_COUNT]>,
        intercepts: Vec<f64>,
    ) -> Result<Self, ModelLoadError> {
        let model = Self {
            weights,
            intercepts,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }
        let model: Self = serde_json::from_slice(&std::fs::read(path)?)?;
        model.validate()?;
        tracing::info!(path = %path.display(), "Linear softmax classifier loaded");
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        if self.weights.len() != CLASS_COUNT || self.intercepts.len() != CLASS_COUNT {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "expected {CLASS_COUNT} weight rows and intercepts, got {} and {}",
                self.weights.len(),
                self.intercepts.len()
            )));
        }
        let all_finite = self
            .weights
            .iter()
            .flatten()
            .chain(self.intercepts.iter())
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelLoadError::InvalidArtifact(
                "coefficients must be finite".into(),
            ));
        }
        Ok(())
    }

    fn logits(&self, row: &FeatureRow) -> Vec<f64> {
        self.weights
            .iter()
            .zip(&self.intercepts)
            .map(|(w, b)| {
                w.iter()
                    .zip(row.values())
                    .map(|(wi, xi)| wi * xi)
                    .sum::<f64>()
                    + b
            })
            .collect()
    }
}

impl HealthClassifier for LinearSoftmaxModel {
    fn predict(&self, row: &FeatureRow) -> Result<usize, InferenceError> {
        let logits = self.logits(row);
        let mut best = 0;
        for (i, &z) in logits.iter().enumerate().skip(1) {
            if z > logits[best] {
                best = i;
            }
        }
        Ok(best)
    }

    fn predict_probabilities(&self, row: &FeatureRow) -> Result<Vec<f64>, InferenceError> {
        let logits = self.logits(row);
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(InferenceError::Classifier(
                "non-finite logits for feature row".into(),
            ));
        }
        let exps: Vec<f64> = logits.iter().map(|z| (z - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        Ok(exps.into_iter().map(|e| e / total).collect())
    }

    fn kind(&self) -> &'static str {
        "linear-softmax"
    }
}
