//! Line heuristic for lab-report page text.
//!
//! Each surviving line is read as `<label><whitespace><number>`. Lines that
//! look like metadata are dropped first; lines that do not match are skipped
//! without error. Report headers, footers and free notes all land there.

use std::sync::LazyLock;

use regex::Regex;

use super::types::RawFieldMap;

static LAB_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s+([-+]?\d*\.?\d+)$").unwrap());

/// Metadata/noise markers. A line containing any of them never carries a value.
const NOISE_MARKERS: [&str; 3] = [":", "|", "Page"];

pub(crate) fn is_noise_line(line: &str) -> bool {
    NOISE_MARKERS.iter().any(|m| line.contains(m))
}

/// Split one line into `(label, value)` if it matches the lab-line shape.
/// Numbers too large for `f64` are skipped like any other non-match.
pub(crate) fn parse_lab_line(line: &str) -> Option<(String, f64)> {
    let caps = LAB_LINE.captures(line)?;
    let label = caps.get(1)?.as_str().trim();
    let value: f64 = caps.get(2)?.as_str().parse().ok()?;
    if label.is_empty() || !value.is_finite() {
        return None;
    }
    Some((label.to_string(), value))
}

/// Collect every `label value` line of a page. Later duplicates overwrite
/// earlier ones.
pub fn parse_lab_lines(text: &str) -> RawFieldMap {
    let mut values = RawFieldMap::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        if is_noise_line(line) {
            continue;
        }
        match parse_lab_line(line) {
            Some((label, value)) => {
                values.insert(label, value);
            }
            None => skipped += 1,
        }
    }

    tracing::debug!(fields = values.len(), skipped, "Lab lines parsed");
    values
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_value_and_drops_note_and_page_lines() {
        let text = "Glucose        0.85\nNote: fasting\nPage 1 of 2";
        let values = parse_lab_lines(text);
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("Glucose"), Some(&0.85));
    }

    #[test]
    fn multi_word_labels_are_trimmed() {
        let values = parse_lab_lines("  Mean Corpuscular Volume   0.47  ");
        // Trailing whitespace after the number breaks the `$` anchor.
        assert!(values.is_empty());

        let values = parse_lab_lines("  Mean Corpuscular Volume   0.47");
        assert_eq!(values.get("Mean Corpuscular Volume"), Some(&0.47));
    }

    #[test]
    fn signed_and_bare_decimal_values() {
        let values = parse_lab_lines("Troponin -0.25\nInsulin +3\nBMI .5\nALT 12");
        assert_eq!(values.get("Troponin"), Some(&-0.25));
        assert_eq!(values.get("Insulin"), Some(&3.0));
        assert_eq!(values.get("BMI"), Some(&0.5));
        assert_eq!(values.get("ALT"), Some(&12.0));
    }

    #[test]
    fn only_the_trailing_number_is_the_value() {
        let values = parse_lab_lines("HbA1c 2024 0.61");
        assert_eq!(values.get("HbA1c 2024"), Some(&0.61));
    }

    #[test]
    fn pipe_and_colon_lines_are_noise() {
        let values = parse_lab_lines("Glucose | 0.85\nInsulin: 0.4\nHemoglobin 0.52");
        assert_eq!(values.len(), 1);
        assert!(values.contains_key("Hemoglobin"));
    }

    #[test]
    fn page_marker_is_case_sensitive() {
        let values = parse_lab_lines("page count 3\nPages 4");
        assert_eq!(values.get("page count"), Some(&3.0));
        assert!(!values.contains_key("Pages"));
    }

    #[test]
    fn lines_without_a_number_are_skipped() {
        let values = parse_lab_lines("LABORATORY REPORT\nGlucose high\n\nPlatelets 0.3");
        assert_eq!(values.len(), 1);
        assert_eq!(values.get("Platelets"), Some(&0.3));
    }

    #[test]
    fn bare_number_has_no_label() {
        assert!(parse_lab_lines("0.85").is_empty());
        assert!(parse_lab_lines("   0.85").is_empty());
    }

    #[test]
    fn later_duplicate_wins() {
        let values = parse_lab_lines("Glucose 0.1\nGlucose 0.9");
        assert_eq!(values.get("Glucose"), Some(&0.9));
    }

    #[test]
    fn crlf_line_endings_are_tolerated() {
        let values = parse_lab_lines("Glucose 0.85\r\nInsulin 0.40\r\n");
        assert_eq!(values.len(), 2);
        assert_eq!(values.get("Insulin"), Some(&0.40));
    }

    #[test]
    fn overflowing_number_is_skipped() {
        let huge = format!("Glucose 1{}", "0".repeat(400));
        let values = parse_lab_lines(&format!("{huge}\nInsulin 0.40"));
        assert!(!values.contains_key("Glucose"));
        assert_eq!(values.get("Insulin"), Some(&0.40));
    }
}
