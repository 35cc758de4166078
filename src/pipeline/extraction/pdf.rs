use std::panic::{catch_unwind, AssertUnwindSafe};

use super::types::PdfExtractor;
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; image-only scans yield
/// empty page text.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
        // pdf-extract panics on some loadable-but-broken documents (missing
        // font resources, text shown before any font is set).
        match catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        })) {
            Ok(pages) => pages.map_err(|e| ExtractionError::PdfParsing(e.to_string())),
            Err(_) => {
                tracing::warn!("PDF text extraction panicked; treating document as unreadable");
                Err(ExtractionError::PdfParsing(
                    "text extractor aborted on malformed content".into(),
                ))
            }
        }
    }
}
