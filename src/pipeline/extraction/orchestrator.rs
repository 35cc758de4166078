use super::format::{detect_format, DocumentFormat};
use super::lab_lines::parse_lab_lines;
use super::tabular::parse_csv;
use super::types::{PdfExtractor, RawFieldMap, UploadedFile};
use super::ExtractionError;

/// Turns an upload into a raw label → value map.
/// Uses a trait object for PDF text, enabling dependency injection.
pub struct DocumentParser {
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
}

impl DocumentParser {
    pub fn new(pdf_extractor: Box<dyn PdfExtractor + Send + Sync>) -> Self {
        Self { pdf_extractor }
    }

    /// Dispatch on the declared extension, then parse. The format is decided
    /// before any byte of the upload is read.
    pub fn parse(&self, file: &UploadedFile) -> Result<RawFieldMap, ExtractionError> {
        let format = detect_format(&file.filename)?;

        let values = match format {
            DocumentFormat::Csv => parse_csv(&file.bytes)?,
            DocumentFormat::Pdf => self.parse_pdf(&file.bytes)?,
        };

        tracing::info!(
            format = format.as_str(),
            fields = values.len(),
            "Document parsed"
        );

        Ok(values)
    }

    fn parse_pdf(&self, bytes: &[u8]) -> Result<RawFieldMap, ExtractionError> {
        let text = self
            .pdf_extractor
            .first_page_text(bytes)?
            .filter(|t| !t.trim().is_empty())
            .ok_or(ExtractionError::NoExtractableText)?;

        let values = parse_lab_lines(&text);
        if values.is_empty() {
            return Err(ExtractionError::NoNumericFields);
        }
        Ok(values)
    }
}
