//! Renormalizes the classifier distribution and settles the final label.
//!
//! The distribution is authoritative: when its argmax disagrees with the
//! classifier's discrete prediction, the argmax becomes the final label.
//! Ties go to the class declared first in `ClassLabel::ALL`.

use super::InferenceError;
use crate::models::{ClassLabel, ProbabilityDistribution, CLASS_COUNT};

/// Reconciled classifier output, before recommendations are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub final_label: ClassLabel,
    pub probabilities: ProbabilityDistribution,
    pub raw_label: Option<ClassLabel>,
    /// True when `final_label` differs from `raw_label`.
    pub overridden: bool,
}

pub fn reconcile(
    raw_label: Option<ClassLabel>,
    raw_distribution: &[f64],
) -> Result<Reconciliation, InferenceError> {
    if raw_distribution.len() != CLASS_COUNT {
        return Err(InferenceError::DegenerateDistribution(format!(
            "expected {CLASS_COUNT} class probabilities, got {}",
            raw_distribution.len()
        )));
    }
    if let Some(bad) = raw_distribution.iter().find(|p| !p.is_finite() || **p < 0.0) {
        return Err(InferenceError::DegenerateDistribution(format!(
            "invalid class probability {bad}"
        )));
    }

    // Entries are scaled by the largest one first so that finite vectors
    // whose plain sum would overflow still normalize.
    let peak = raw_distribution.iter().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        return Err(InferenceError::DegenerateDistribution(
            "probabilities sum to 0".to_string(),
        ));
    }
    let total: f64 = raw_distribution.iter().map(|p| p / peak).sum();

    let mut percentages = [0.0; CLASS_COUNT];
    for (pct, p) in percentages.iter_mut().zip(raw_distribution) {
        *pct = p / peak / total * 100.0;
    }
    let probabilities = ProbabilityDistribution::from_percentages(percentages);

    let best = probabilities.argmax();
    let overridden = raw_label != Some(best);
    if overridden {
        tracing::warn!(
            raw = raw_label.map(|l| l.as_str()).unwrap_or("<undecoded>"),
            final_label = best.as_str(),
            "Discrete prediction overridden by probability argmax"
        );
    }

    Ok(Reconciliation {
        final_label: best,
        probabilities,
        raw_label,
        overridden,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_sums_to_100(rec: &Reconciliation) {
        assert!(
            (rec.probabilities.total() - 100.0).abs() < 1e-6,
            "total was {}",
            rec.probabilities.total()
        );
    }

    #[test]
    fn renormalizes_to_percentages() {
        let rec = reconcile(Some(ClassLabel::Healthy), &[0.1, 0.1, 0.6, 0.1, 0.05, 0.05]).unwrap();
        assert_eq!(rec.final_label, ClassLabel::Healthy);
        assert!(!rec.overridden);
        assert!((rec.probabilities.get(ClassLabel::Healthy) - 60.0).abs() < 1e-9);
        assert_sums_to_100(&rec);
        assert_eq!(rec.probabilities.iter().count(), CLASS_COUNT);
    }

    #[test]
    fn unnormalized_inputs_are_rescaled() {
        let rec = reconcile(Some(ClassLabel::Diabetes), &[3.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!((rec.probabilities.get(ClassLabel::Diabetes) - 75.0).abs() < 1e-9);
        assert!((rec.probabilities.get(ClassLabel::HeartDisease) - 25.0).abs() < 1e-9);
        assert_eq!(rec.probabilities.get(ClassLabel::Anemia), 0.0);
        assert_sums_to_100(&rec);
    }

    #[test]
    fn awkward_vectors_still_sum_to_100() {
        let vectors: [[f64; CLASS_COUNT]; 4] = [
            [1e-300, 2e-300, 3e-300, 0.0, 0.0, 1e-300],
            [0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
            [1e9, 1.0, 1.0, 1.0, 1.0, 1.0],
            [1.0 / 3.0; CLASS_COUNT],
        ];
        for v in vectors {
            let rec = reconcile(None, &v).unwrap();
            assert_sums_to_100(&rec);
        }
    }

    #[test]
    fn probability_argmax_overrides_raw_label() {
        let rec = reconcile(Some(ClassLabel::Healthy), &[0.05, 0.05, 0.2, 0.05, 0.6, 0.05]).unwrap();
        assert_eq!(rec.final_label, ClassLabel::Anemia);
        assert_eq!(rec.raw_label, Some(ClassLabel::Healthy));
        assert!(rec.overridden);
    }

    #[test]
    fn undecoded_raw_label_uses_argmax() {
        let rec = reconcile(None, &[0.0, 0.0, 0.0, 0.9, 0.1, 0.0]).unwrap();
        assert_eq!(rec.final_label, ClassLabel::Thalassemia);
        assert!(rec.overridden);
    }

    #[test]
    fn ties_go_to_first_declared_class() {
        for _ in 0..50 {
            let rec = reconcile(Some(ClassLabel::Anemia), &[0.1, 0.1, 0.0, 0.4, 0.4, 0.0]).unwrap();
            assert_eq!(rec.final_label, ClassLabel::Thalassemia);
        }
        let rec = reconcile(None, &[0.25, 0.0, 0.25, 0.25, 0.25, 0.0]).unwrap();
        assert_eq!(rec.final_label, ClassLabel::Diabetes);
    }

    #[test]
    fn zero_sum_is_degenerate() {
        let err = reconcile(Some(ClassLabel::Healthy), &[0.0; CLASS_COUNT]).unwrap_err();
        assert!(matches!(err, InferenceError::DegenerateDistribution(_)));
    }

    #[test]
    fn negative_entries_are_degenerate() {
        let err = reconcile(None, &[-0.5, 0.2, 0.1, 0.1, 0.05, 0.05]).unwrap_err();
        assert!(matches!(err, InferenceError::DegenerateDistribution(_)));
    }

    #[test]
    fn non_finite_entries_are_degenerate() {
        for bad in [f64::NAN, f64::INFINITY] {
            let err = reconcile(None, &[bad, 0.2, 0.1, 0.1, 0.05, 0.05]).unwrap_err();
            assert!(matches!(err, InferenceError::DegenerateDistribution(_)));
        }
    }

    #[test]
    fn wrong_length_is_degenerate() {
        let err = reconcile(None, &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, InferenceError::DegenerateDistribution(ref m) if m.contains("got 2")));
    }

    #[test]
    fn sum_overflow_still_normalizes() {
        let rec = reconcile(None, &[1e308, 1e308, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert!((rec.probabilities.get(ClassLabel::Diabetes) - 50.0).abs() < 1e-9);
        assert!((rec.probabilities.get(ClassLabel::HeartDisease) - 50.0).abs() < 1e-9);
        assert_eq!(rec.final_label, ClassLabel::Diabetes);
        assert_sums_to_100(&rec);
    }
}
