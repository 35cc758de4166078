use std::collections::BTreeMap;

use super::ExtractionError;

/// Field label as printed in the document → parsed numeric value.
///
/// Labels are kept verbatim; matching against the biomarker schema is exact.
pub type RawFieldMap = BTreeMap<String, f64>;

/// An uploaded report as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

/// PDF text extraction abstraction (allows mocking for tests)
pub trait PdfExtractor {
    /// Text of every page, in page order.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError>;

    /// Text of the first page, `None` when the document has no pages.
    fn first_page_text(&self, pdf_bytes: &[u8]) -> Result<Option<String>, ExtractionError> {
        Ok(self.extract_pages(pdf_bytes)?.into_iter().next())
    }
}
