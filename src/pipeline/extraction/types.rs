use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ExtractionError;
use crate::pipeline::import::UploadedFile;

/// Placeholder for metadata the pattern match could not find.
pub const UNKNOWN_FIELD: &str = "[Unknown]";

/// Text and patient metadata derived from one upload.
///
/// `raw_text` is never blank, contains no NUL bytes and no U+2212.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedDocument {
    pub raw_text: String,
    pub patient_name: String,
    pub test_date: String,
    pub method: ExtractionMethod,
    pub page_count: usize,
}

impl ExtractedDocument {
    pub fn has_patient_name(&self) -> bool {
        self.patient_name != UNKNOWN_FIELD
    }

    pub fn has_test_date(&self) -> bool {
        self.test_date != UNKNOWN_FIELD
    }
}

/// How text was extracted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PdfText,
    TesseractOcr,
    PlainTextRead,
}

/// Text of a single PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct PageText {
    pub page_number: usize,
    pub text: String,
}

/// Raw OCR result from the engine
#[derive(Debug)]
pub struct OcrPageResult {
    pub text: String,
    /// Mean confidence in 0.0..=1.0, when the engine reports one.
    pub confidence: Option<f32>,
}

#[derive(Error, Debug)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    EngineUnavailable(String),

    #[error("OCR processing failed: {0}")]
    Processing(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// OCR engine abstraction (allows mocking for tests)
pub trait OcrEngine {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, OcrError>;
}

/// PDF text extraction abstraction
pub trait PdfExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError>;
}

/// Main extraction entry point
pub trait TextExtractor {
    fn extract(&self, file: &UploadedFile) -> Result<ExtractedDocument, ExtractionError>;
}
