use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::enums::{ClassLabel, CLASS_COUNT};

/// Percentage per diagnosis class, indexed like `ClassLabel::ALL`.
///
/// Built only by the reconciler, so entries are in [0, 100] and sum to 100.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityDistribution {
    percentages: [f64; CLASS_COUNT],
}

impl ProbabilityDistribution {
    pub(crate) fn from_percentages(percentages: [f64; CLASS_COUNT]) -> Self {
        Self { percentages }
    }

    pub fn get(&self, label: ClassLabel) -> f64 {
        self.percentages[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClassLabel, f64)> + '_ {
        ClassLabel::ALL.into_iter().zip(self.percentages.iter().copied())
    }

    pub fn total(&self) -> f64 {
        self.percentages.iter().sum()
    }

    /// Highest-probability class. Exact ties go to the class declared first.
    pub fn argmax(&self) -> ClassLabel {
        let mut best = ClassLabel::ALL[0];
        for (label, pct) in self.iter().skip(1) {
            if pct > self.get(best) {
                best = label;
            }
        }
        best
    }
}

impl Serialize for ProbabilityDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CLASS_COUNT))?;
        for (label, pct) in self.iter() {
            map.serialize_entry(label.as_str(), &pct)?;
        }
        map.end()
    }
}

/// Final answer for one uploaded report.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    #[serde(rename = "prediction")]
    pub final_label: ClassLabel,
    pub probabilities: ProbabilityDistribution,
    pub recommendations: Vec<String>,
}
