use std::path::Path;

use serde::Deserialize;

use super::ModelLoadError;
use crate::models::{ClassLabel, CLASS_COUNT};

/// On-disk label encoder: class names in encoded-index order.
#[derive(Debug, Deserialize)]
struct LabelEncoderFile {
    classes: Vec<String>,
}

/// Maps the classifier's predicted index back to a diagnosis class.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelDecoder {
    classes: Vec<ClassLabel>,
}

impl LabelDecoder {
    /// Decoder whose index order is `ClassLabel::ALL`.
    pub fn identity() -> Self {
        Self {
            classes: ClassLabel::ALL.to_vec(),
        }
    }

    /// Build from class names. Every name must resolve to a known class.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, ModelLoadError> {
        if names.len() != CLASS_COUNT {
            return Err(ModelLoadError::InvalidArtifact(format!(
                "label encoder lists {} classes, expected {CLASS_COUNT}",
                names.len()
            )));
        }

        let classes = names
            .iter()
            .map(|name| {
                ClassLabel::from_name(name.as_ref()).ok_or_else(|| {
                    ModelLoadError::InvalidArtifact(format!(
                        "unknown class name in label encoder: {:?}",
                        name.as_ref()
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let decoder = Self { classes };
        if !decoder.is_aligned() {
            tracing::warn!(
                classes = ?decoder.classes,
                "Label encoder order differs from the probability column order"
            );
        }
        Ok(decoder)
    }

    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        if !path.exists() {
            return Err(ModelLoadError::NotFound(path.to_path_buf()));
        }
        let file: LabelEncoderFile = serde_json::from_slice(&std::fs::read(path)?)?;
        Self::from_names(&file.classes)
    }

    /// Translate a predicted index. `None` for an index the encoder never saw.
    pub fn decode(&self, index: usize) -> Option<ClassLabel> {
        self.classes.get(index).copied()
    }

    /// True when encoded index `i` names the class of probability column `i`.
    pub fn is_aligned(&self) -> bool {
        self.classes.as_slice() == ClassLabel::ALL.as_slice()
    }
}
