//! Shared application state for the HTTP layer.
//!
//! `CoreState` is built once before the server binds and handed to every
//! request through `Arc`. Nothing in it changes after construction, so it
//! needs no locks: the classifier outcome from startup is final.

use chrono::{DateTime, Utc};

use crate::config::ServiceConfig;
use crate::pipeline::inference::{load_model, ModelAvailability};
use crate::pipeline::Processor;

// ═══════════════════════════════════════════════════════════
// CoreState
// ═══════════════════════════════════════════════════════════

pub struct CoreState {
    processor: Processor,
    /// Request body cap applied by the router.
    pub max_upload_bytes: usize,
    started_at: DateTime<Utc>,
}

impl CoreState {
    pub fn new(processor: Processor, max_upload_bytes: usize) -> Self {
        Self {
            processor,
            max_upload_bytes,
            started_at: Utc::now(),
        }
    }

    /// Load the model artifacts named by `config` and wire the production
    /// pipeline. A failed load still yields a state; analysis requests are
    /// then refused with `MODEL_UNAVAILABLE`.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let model = load_model(&config.model_dir);
        Self::with_model(model, config.max_upload_bytes)
    }

    pub fn with_model(model: ModelAvailability, max_upload_bytes: usize) -> Self {
        Self::new(Processor::with_model(model), max_upload_bytes)
    }

    pub fn processor(&self) -> &Processor {
        &self.processor
    }

    pub fn model_loaded(&self) -> bool {
        self.processor.model_available()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_model_is_reported() {
        let state = CoreState::with_model(ModelAvailability::unavailable("no artifacts"), 1024);
        assert!(!state.model_loaded());
        assert_eq!(state.max_upload_bytes, 1024);
    }

    #[test]
    fn from_config_with_empty_dir_still_builds() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServiceConfig {
            model_dir: dir.path().to_path_buf(),
            ..ServiceConfig::default()
        };
        let state = CoreState::from_config(&config);
        assert!(!state.model_loaded());
        assert!(state.started_at() <= Utc::now());
    }
}
