pub mod types;
pub mod sanitize;
pub mod preprocess;
pub mod pdf;
pub mod ocr;
pub mod metadata;
pub mod orchestrator;

pub use types::*;
pub use sanitize::*;
pub use preprocess::*;
pub use pdf::*;
pub use ocr::*;
pub use metadata::*;
pub use orchestrator::*;

use thiserror::Error;

use crate::pipeline::import::{accepted_extensions_phrase, FileFormat};

/// Terminal failures of a single extraction. None of them is retried.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Unsupported file format. Please upload a {} file.", accepted_extensions_phrase())]
    UnsupportedFormat { extension: String },

    #[error("Could not read {format} file: {reason}")]
    UnreadableFile { format: FileFormat, reason: String },

    #[error("No readable text found in the file")]
    NoReadableText,

    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),
}

impl ExtractionError {
    pub fn unreadable(format: FileFormat, reason: impl Into<String>) -> Self {
        Self::UnreadableFile {
            format,
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code, one per variant.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::UnreadableFile { .. } => "UNREADABLE_FILE",
            Self::NoReadableText => "NO_READABLE_TEXT",
            Self::OcrUnavailable(_) => "OCR_UNAVAILABLE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_message_names_accepted_set() {
        let err = ExtractionError::UnsupportedFormat {
            extension: "docx".into(),
        };
        assert_eq!(
            err.to_string(),
            "Unsupported file format. Please upload a .txt, .pdf, or .jpg file."
        );
    }

    #[test]
    fn unreadable_message_names_format() {
        let err = ExtractionError::unreadable(FileFormat::Pdf, "missing xref");
        assert_eq!(err.to_string(), "Could not read pdf file: missing xref");
    }

    #[test]
    fn codes_are_distinct() {
        let codes = [
            ExtractionError::UnsupportedFormat { extension: String::new() }.code(),
            ExtractionError::unreadable(FileFormat::PlainText, "bad").code(),
            ExtractionError::NoReadableText.code(),
            ExtractionError::OcrUnavailable("missing".into()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
