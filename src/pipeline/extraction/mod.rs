pub mod format;
pub mod lab_lines;
pub mod orchestrator;
pub mod pdf;
pub mod tabular;
pub mod types;

pub use format::*;
pub use orchestrator::*;
pub use pdf::*;
pub use types::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported file format: {0} (use CSV or PDF)")]
    UnsupportedFormat(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("No text detected on the first PDF page")]
    NoExtractableText,

    #[error("No numeric lab values found in the document")]
    NoNumericFields,

    #[error("CSV parsing failed: {0}")]
    Tabular(#[from] csv::Error),

    #[error("CSV file has a header row but no data rows")]
    NoDataRows,
}
