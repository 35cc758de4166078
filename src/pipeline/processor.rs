//! Lab report analysis orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! parse → feature row → classifier → reconcile → recommendations.
//!
//! Uses trait-based DI for the PDF extractor and the classifier so the
//! orchestrator stays testable with stub implementations.

use serde::Serialize;
use uuid::Uuid;

use crate::models::ClassificationResult;
use crate::pipeline::extraction::{
    sanitize_filename, DocumentParser, ExtractionError, PdfTextExtractor, UploadedFile,
};
use crate::pipeline::features::{build_feature_row, SchemaError};
use crate::pipeline::inference::{reconcile, ClassifierAdapter, InferenceError, ModelAvailability};
use crate::pipeline::recommendations::recommendations_for;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while analyzing an upload.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Schema validation failed: {0}")]
    Schema(#[from] SchemaError),

    #[error("Inference failed: {0}")]
    Inference(#[from] InferenceError),
}

/// Caller-facing failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    UnsupportedFormat,
    UnparsableDocument,
    SchemaValidationFailed,
    ModelUnavailable,
    DegenerateDistribution,
    InferenceFailed,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::UnparsableDocument => "UNPARSABLE_DOCUMENT",
            Self::SchemaValidationFailed => "SCHEMA_VALIDATION_FAILED",
            Self::ModelUnavailable => "MODEL_UNAVAILABLE",
            Self::DegenerateDistribution => "DEGENERATE_DISTRIBUTION",
            Self::InferenceFailed => "INFERENCE_FAILED",
        }
    }
}

impl ProcessingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Extraction(ExtractionError::UnsupportedFormat(_)) => ErrorKind::UnsupportedFormat,
            Self::Extraction(_) => ErrorKind::UnparsableDocument,
            Self::Schema(_) => ErrorKind::SchemaValidationFailed,
            Self::Inference(InferenceError::ModelUnavailable(_)) => ErrorKind::ModelUnavailable,
            Self::Inference(InferenceError::DegenerateDistribution(_)) => {
                ErrorKind::DegenerateDistribution
            }
            Self::Inference(InferenceError::Classifier(_)) => ErrorKind::InferenceFailed,
        }
    }

    /// Message safe to show the caller. Library error text, file paths and
    /// CSV positions stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            Self::Extraction(ExtractionError::PdfParsing(_)) => {
                "The PDF could not be read".to_string()
            }
            Self::Extraction(ExtractionError::Tabular(_)) => {
                "The CSV file could not be read".to_string()
            }
            Self::Extraction(e) => e.to_string(),
            Self::Schema(e) => e.to_string(),
            Self::Inference(InferenceError::ModelUnavailable(_)) => {
                "The health model is not loaded".to_string()
            }
            Self::Inference(InferenceError::DegenerateDistribution(_)) => {
                "The classifier returned an unusable probability distribution".to_string()
            }
            Self::Inference(InferenceError::Classifier(_)) => {
                "The classifier failed to run".to_string()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Orchestrates one analysis. Holds no per-request state; one instance is
/// shared by every request.
pub struct Processor {
    parser: DocumentParser,
    classifier: ClassifierAdapter,
}

impl Processor {
    pub fn new(parser: DocumentParser, classifier: ClassifierAdapter) -> Self {
        Self { parser, classifier }
    }

    /// Production wiring: pdf-extract for PDFs plus the startup model.
    pub fn with_model(model: ModelAvailability) -> Self {
        Self::new(
            DocumentParser::new(Box::new(PdfTextExtractor)),
            ClassifierAdapter::new(model),
        )
    }

    pub fn model_available(&self) -> bool {
        self.classifier.is_available()
    }

    /// Full pipeline for one upload. Stops at the first failing stage; no
    /// partial result is produced.
    pub fn analyze(&self, file: &UploadedFile) -> Result<ClassificationResult, ProcessingError> {
        let request_id = Uuid::new_v4();
        let _span = tracing::info_span!(
            "analyze",
            %request_id,
            file = %sanitize_filename(&file.filename),
        )
        .entered();

        let result = self.run_stages(file);
        if let Err(e) = &result {
            tracing::warn!(kind = e.kind().as_str(), error = %e, "Analysis failed");
        }
        result
    }

    fn run_stages(&self, file: &UploadedFile) -> Result<ClassificationResult, ProcessingError> {
        // Step 1: Document → raw label/value map
        let raw = self.parser.parse(file)?;

        // Step 2: Schema validation + ordering
        let row = build_feature_row(&raw)?;

        // Step 3: Classifier
        let prediction = self.classifier.infer(&row)?;

        // Step 4: Renormalize + settle the label
        let reconciled = reconcile(prediction.raw_label, &prediction.distribution)?;

        // Step 5: Advice
        let recommendations = recommendations_for(reconciled.final_label);

        tracing::info!(
            prediction = reconciled.final_label.as_str(),
            overridden = reconciled.overridden,
            "Analysis complete"
        );

        Ok(ClassificationResult {
            final_label: reconciled.final_label,
            probabilities: reconciled.probabilities,
            recommendations,
        })
    }
}
