//! Projects a parsed document onto the biomarker schema.

use thiserror::Error;

use crate::models::{FeatureRow, BIOMARKER_COUNT, BIOMARKER_SCHEMA};
use crate::pipeline::extraction::RawFieldMap;

#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("Missing biomarkers: {}", .0.join(", "))]
    MissingBiomarkers(Vec<String>),

    #[error("Biomarkers with non-finite values: {}", .0.join(", "))]
    NonFiniteValues(Vec<String>),
}

/// Build the classifier row from the raw map.
///
/// Every schema name must be present verbatim. All absent names are reported
/// together, in schema order. Extra fields are dropped and values pass
/// through unchanged, but every projected value must be finite.
pub fn build_feature_row(raw: &RawFieldMap) -> Result<FeatureRow, SchemaError> {
    let missing: Vec<String> = BIOMARKER_SCHEMA
        .iter()
        .filter(|name| !raw.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    if !missing.is_empty() {
        tracing::info!(
            missing = missing.len(),
            found = raw.len(),
            "Feature row rejected: biomarkers missing"
        );
        return Err(SchemaError::MissingBiomarkers(missing));
    }

    let mut values = [0.0; BIOMARKER_COUNT];
    for (slot, name) in values.iter_mut().zip(BIOMARKER_SCHEMA.iter()) {
        *slot = raw[*name];
    }

    let non_finite: Vec<String> = BIOMARKER_SCHEMA
        .iter()
        .zip(values.iter())
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, _)| name.to_string())
        .collect();
    if !non_finite.is_empty() {
        tracing::info!(
            non_finite = non_finite.len(),
            "Feature row rejected: non-finite biomarker values"
        );
        return Err(SchemaError::NonFiniteValues(non_finite));
    }

    let extra = raw.len() - BIOMARKER_COUNT;
    if extra > 0 {
        tracing::debug!(extra, "Ignoring fields outside the biomarker schema");
    }

    Ok(FeatureRow::from_schema_order(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> RawFieldMap {
        BIOMARKER_SCHEMA
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), i as f64 / 100.0))
            .collect()
    }

    #[test]
    fn full_map_projects_in_schema_order() {
        let row = build_feature_row(&full_map()).unwrap();
        for (i, (name, value)) in row.iter().enumerate() {
            assert_eq!(name, BIOMARKER_SCHEMA[i]);
            assert_eq!(value, i as f64 / 100.0);
        }
    }

    #[test]
    fn extraneous_fields_are_dropped() {
        let mut raw = full_map();
        raw.insert("Vitamin D".into(), 42.0);
        raw.insert("Patient Age".into(), 61.0);
        let row = build_feature_row(&raw).unwrap();
        assert_eq!(row.values().len(), BIOMARKER_COUNT);
        assert_eq!(row.get("Vitamin D"), None);
    }

    #[test]
    fn every_missing_name_is_listed() {
        let mut raw = full_map();
        raw.remove("Glucose");
        raw.remove("HbA1c");
        raw.remove("C-reactive Protein");

        let err = build_feature_row(&raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingBiomarkers(vec![
                "Glucose".into(),
                "HbA1c".into(),
                "C-reactive Protein".into(),
            ])
        );
        assert_eq!(
            err.to_string(),
            "Missing biomarkers: Glucose, HbA1c, C-reactive Protein"
        );
    }

    #[test]
    fn empty_map_lists_whole_schema() {
        let err = build_feature_row(&RawFieldMap::new()).unwrap_err();
        let missing = match err {
            SchemaError::MissingBiomarkers(missing) => missing,
            other => panic!("expected missing biomarkers, got {other:?}"),
        };
        assert_eq!(missing.len(), BIOMARKER_COUNT);
        assert_eq!(missing, BIOMARKER_SCHEMA.map(String::from).to_vec());
    }

    #[test]
    fn keys_are_not_case_normalized() {
        let mut raw = full_map();
        let value = raw.remove("Glucose").unwrap();
        raw.insert("glucose".into(), value);
        let err = build_feature_row(&raw).unwrap_err();
        assert_eq!(err, SchemaError::MissingBiomarkers(vec!["Glucose".into()]));
    }

    #[test]
    fn values_pass_through_unscaled() {
        let mut raw = full_map();
        raw.insert("Glucose".into(), 126.0);
        raw.insert("Troponin".into(), -0.01);
        let row = build_feature_row(&raw).unwrap();
        assert_eq!(row.get("Glucose"), Some(126.0));
        assert_eq!(row.get("Troponin"), Some(-0.01));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let mut raw = full_map();
        raw.insert("Glucose".into(), f64::INFINITY);
        raw.insert("Troponin".into(), f64::NAN);
        let err = build_feature_row(&raw).unwrap_err();
        assert_eq!(
            err,
            SchemaError::NonFiniteValues(vec!["Glucose".into(), "Troponin".into()])
        );
    }

    #[test]
    fn missing_names_reported_before_non_finite_values() {
        let mut raw = full_map();
        raw.insert("Glucose".into(), f64::INFINITY);
        raw.remove("BMI");
        let err = build_feature_row(&raw).unwrap_err();
        assert_eq!(err, SchemaError::MissingBiomarkers(vec!["BMI".into()]));
    }
}
