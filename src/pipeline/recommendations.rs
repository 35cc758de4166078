//! Static care advice per diagnosis class.

use crate::models::ClassLabel;

/// Returned for a label with no table entry.
pub const FALLBACK_RECOMMENDATION: &str = "Consult a healthcare professional.";

type RecommendationTable = [(ClassLabel, &'static [&'static str])];

static RECOMMENDATIONS: &RecommendationTable = &[
    (
        ClassLabel::Diabetes,
        &[
            "Monitor your blood sugar regularly",
            "Keep a balanced diet",
            "Exercise regularly",
            "See a diabetologist",
        ],
    ),
    (
        ClassLabel::HeartDisease,
        &[
            "Monitor your blood pressure",
            "Avoid salty foods",
            "Get moderate exercise",
            "See a cardiologist",
        ],
    ),
    (
        ClassLabel::Healthy,
        &[
            "Keep up a healthy lifestyle",
            "Schedule regular check-ups",
            "Keep a balanced diet",
            "Exercise regularly",
        ],
    ),
    (
        ClassLabel::Thalassemia,
        &[
            "See a hematologist",
            "Monitor your iron levels",
            "Avoid vitamin deficiencies",
            "Have regular blood tests",
        ],
    ),
    (
        ClassLabel::Anemia,
        &[
            "Increase your iron intake",
            "Take supplements if prescribed",
            "Watch your diet",
            "See a doctor for follow-up",
        ],
    ),
    (
        ClassLabel::Thrombocytopenia,
        &[
            "Monitor your platelet count",
            "Avoid activities with a risk of bleeding",
            "See a hematologist",
            "Have regular blood tests",
        ],
    ),
];

pub fn recommendations_for(label: ClassLabel) -> Vec<String> {
    lookup(RECOMMENDATIONS, label)
}

fn lookup(table: &RecommendationTable, label: ClassLabel) -> Vec<String> {
    match table.iter().find(|(l, _)| *l == label) {
        Some((_, advice)) => advice.iter().map(|s| s.to_string()).collect(),
        None => {
            tracing::warn!(label = label.as_str(), "No recommendations for label");
            vec![FALLBACK_RECOMMENDATION.to_string()]
        }
    }
}
