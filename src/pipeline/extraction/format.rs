use std::path::Path;

use super::ExtractionError;

/// Upload formats the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Csv,
    Pdf,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }
}

/// Pick the parser from the declared filename. Content is never sniffed:
/// a `.pdf` that is not a PDF fails later as unparsable.
pub fn detect_format(filename: &str) -> Result<DocumentFormat, ExtractionError> {
    let lowered = filename.trim().to_lowercase();
    if lowered.ends_with(".pdf") {
        Ok(DocumentFormat::Pdf)
    } else if lowered.ends_with(".csv") {
        Ok(DocumentFormat::Csv)
    } else {
        let ext = Path::new(&lowered)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_else(|| "no extension".to_string());
        Err(ExtractionError::UnsupportedFormat(ext))
    }
}

/// Sanitize a filename for logging: strip path components, limit length
pub fn sanitize_filename(original: &str) -> String {
    let name = Path::new(original)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");

    let clean: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0') && !c.is_control())
        .take(255)
        .collect();

    if clean.is_empty() {
        "document".to_string()
    } else {
        clean
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_pdf_and_csv_case_insensitively() {
        assert_eq!(detect_format("report.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(detect_format("REPORT.PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(detect_format("panel.csv").unwrap(), DocumentFormat::Csv);
        assert_eq!(detect_format("Panel.Csv").unwrap(), DocumentFormat::Csv);
    }

    #[test]
    fn docx_is_unsupported() {
        let err = detect_format("results.docx").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref ext) if ext == ".docx"));
    }

    #[test]
    fn missing_extension_is_unsupported() {
        let err = detect_format("results").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedFormat(ref ext) if ext == "no extension"));
    }

    #[test]
    fn extension_must_be_a_suffix() {
        assert!(detect_format("report.pdf.exe").is_err());
        assert!(detect_format("csv").is_err());
    }

    #[test]
    fn sanitize_path_traversal() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("normal_file.pdf"), "normal_file.pdf");
        assert_eq!(sanitize_filename(""), "document");
        assert_eq!(sanitize_filename("file\0name.pdf"), "filename.pdf");
    }

    #[test]
    fn sanitize_preserves_normal_names() {
        assert_eq!(sanitize_filename("bilan_2024.csv"), "bilan_2024.csv");
        assert_eq!(sanitize_filename("lab results (1).pdf"), "lab results (1).pdf");
    }
}
