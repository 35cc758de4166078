use super::types::RawFieldMap;
use super::ExtractionError;

/// Read a header-row CSV export. Only the first data record is used: one
/// patient per upload.
///
/// Cells are trimmed before parsing. Cells that are not finite numbers are
/// left out, so a non-numeric biomarker is reported as missing downstream.
/// When a header repeats, the first numeric column under it wins.
pub fn parse_csv(bytes: &[u8]) -> Result<RawFieldMap, ExtractionError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let record = match reader.records().next() {
        Some(record) => record?,
        None => return Err(ExtractionError::NoDataRows),
    };

    let mut values = RawFieldMap::new();
    let mut non_numeric = 0usize;

    for (header, cell) in headers.iter().zip(record.iter()) {
        if values.contains_key(header) {
            continue;
        }
        match cell.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => {
                values.insert(header.to_string(), v);
            }
            _ => non_numeric += 1,
        }
    }

    tracing::debug!(
        columns = headers.len(),
        fields = values.len(),
        non_numeric,
        "CSV first record parsed"
    );

    Ok(values)
}
