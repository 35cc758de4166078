/// Number of biomarkers the classifier consumes.
pub const BIOMARKER_COUNT: usize = 24;

/// Canonical biomarker names, in the column order the classifier was fitted on.
pub const BIOMARKER_SCHEMA: [&str; BIOMARKER_COUNT] = [
    "Glucose",
    "Cholesterol",
    "Hemoglobin",
    "Platelets",
    "White Blood Cells",
    "Red Blood Cells",
    "Hematocrit",
    "Mean Corpuscular Volume",
    "Mean Corpuscular Hemoglobin",
    "Mean Corpuscular Hemoglobin Concentration",
    "Insulin",
    "BMI",
    "Systolic Blood Pressure",
    "Diastolic Blood Pressure",
    "Triglycerides",
    "HbA1c",
    "LDL Cholesterol",
    "HDL Cholesterol",
    "ALT",
    "AST",
    "Heart Rate",
    "Creatinine",
    "Troponin",
    "C-reactive Protein",
];

/// One patient's biomarker panel in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    values: [f64; BIOMARKER_COUNT],
}

impl FeatureRow {
    /// Wrap values already laid out in `BIOMARKER_SCHEMA` order.
    pub fn from_schema_order(values: [f64; BIOMARKER_COUNT]) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64; BIOMARKER_COUNT] {
        &self.values
    }

    pub fn get(&self, biomarker: &str) -> Option<f64> {
        BIOMARKER_SCHEMA
            .iter()
            .position(|name| *name == biomarker)
            .map(|i| self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        BIOMARKER_SCHEMA.iter().copied().zip(self.values.iter().copied())
    }

    /// Single-precision copy for tensor inputs.
    pub fn to_f32(&self) -> Vec<f32> {
        self.values.iter().map(|&v| v as f32).collect()
    }
}
