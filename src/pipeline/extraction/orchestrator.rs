use super::metadata::parse_metadata;
use super::ocr::TesseractCli;
use super::pdf::PdfTextExtractor;
use super::preprocess::decode_jpeg;
use super::sanitize::{is_blank, normalize_extracted_text};
use super::types::{
    ExtractedDocument, ExtractionMethod, OcrEngine, OcrError, PdfExtractor, TextExtractor,
};
use super::ExtractionError;
use crate::config::PipelineConfig;
use crate::pipeline::import::{FileFormat, UploadedFile};

/// Concrete implementation of the text extractor.
/// Uses trait objects for OCR and PDF extraction, enabling dependency injection.
///
/// Holds no per-request state, so one instance can serve concurrent uploads.
pub struct DocumentExtractor {
    ocr_engine: Box<dyn OcrEngine + Send + Sync>,
    pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
}

impl DocumentExtractor {
    pub fn new(
        ocr_engine: Box<dyn OcrEngine + Send + Sync>,
        pdf_extractor: Box<dyn PdfExtractor + Send + Sync>,
    ) -> Self {
        Self {
            ocr_engine,
            pdf_extractor,
        }
    }

    /// Production wiring: pdf-extract for PDFs, Tesseract for images.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(build_ocr_engine(config), Box::new(PdfTextExtractor))
    }

    fn extract_pdf(&self, bytes: &[u8]) -> Result<(String, usize), ExtractionError> {
        let pages = self.pdf_extractor.extract_pages(bytes)?;
        let total_pages = pages.len();

        let texts: Vec<String> = pages
            .into_iter()
            .filter(|p| !is_blank(&p.text))
            .map(|p| p.text)
            .collect();

        tracing::debug!(
            total_pages,
            pages_with_text = texts.len(),
            "PDF text layer extracted"
        );

        let page_count = texts.len();
        Ok((texts.join("\n"), page_count))
    }

    fn extract_plain_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ExtractionError::unreadable(FileFormat::PlainText, e.to_string()))
    }

    fn extract_image(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        let decoded = decode_jpeg(bytes)?;
        let result = self.ocr_engine.ocr_image(bytes).map_err(map_ocr_error)?;

        tracing::debug!(
            width = decoded.width,
            height = decoded.height,
            confidence = ?result.confidence,
            "OCR complete"
        );

        Ok(result.text)
    }
}

impl TextExtractor for DocumentExtractor {
    fn extract(&self, file: &UploadedFile) -> Result<ExtractedDocument, ExtractionError> {
        tracing::info!(
            filename = file.filename(),
            extension = file.extension(),
            size_bytes = file.size_bytes(),
            "Starting text extraction"
        );

        // Step 1: Dispatch on the declared extension
        let format = file.format().ok_or_else(|| {
            tracing::warn!(extension = file.extension(), "Rejected unsupported upload");
            ExtractionError::UnsupportedFormat {
                extension: file.extension().to_string(),
            }
        })?;

        // Step 2: Extract raw text
        let (method, raw, page_count) = match format {
            FileFormat::Pdf => {
                let (text, pages) = self.extract_pdf(file.bytes())?;
                (ExtractionMethod::PdfText, text, pages)
            }
            FileFormat::PlainText => {
                let text = self.extract_plain_text(file.bytes())?;
                (ExtractionMethod::PlainTextRead, text, 1)
            }
            FileFormat::Jpeg => {
                let text = self.extract_image(file.bytes())?;
                (ExtractionMethod::TesseractOcr, text, 1)
            }
        };

        // Step 3: Normalize, then reject whitespace-only results
        let raw_text = normalize_extracted_text(&raw);
        if is_blank(&raw_text) {
            tracing::warn!(format = %format, "Extraction produced no readable text");
            return Err(ExtractionError::NoReadableText);
        }

        // Step 4: Patient metadata
        let metadata = parse_metadata(&raw_text);

        let document = ExtractedDocument {
            raw_text,
            patient_name: metadata.patient_name,
            test_date: metadata.test_date,
            method,
            page_count,
        };

        tracing::info!(
            method = ?document.method,
            pages = document.page_count,
            text_length = document.raw_text.len(),
            name_found = document.has_patient_name(),
            date_found = document.has_test_date(),
            "Text extraction complete"
        );

        Ok(document)
    }
}

fn map_ocr_error(err: OcrError) -> ExtractionError {
    match err {
        OcrError::Processing(reason) => ExtractionError::unreadable(FileFormat::Jpeg, reason),
        OcrError::EngineUnavailable(reason) => ExtractionError::OcrUnavailable(reason),
        OcrError::Io(e) => ExtractionError::OcrUnavailable(e.to_string()),
    }
}

#[cfg(feature = "ocr")]
fn build_ocr_engine(config: &PipelineConfig) -> Box<dyn OcrEngine + Send + Sync> {
    if let Some(ref tessdata) = config.tessdata_dir {
        match super::ocr::BundledTesseract::new(tessdata, &config.ocr_language) {
            Ok(engine) => {
                tracing::info!(tessdata = %tessdata.display(), "Bundled Tesseract OCR initialized");
                return Box::new(engine);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Bundled Tesseract unavailable, using tesseract CLI");
            }
        }
    }
    Box::new(TesseractCli::from_config(config))
}

#[cfg(not(feature = "ocr"))]
fn build_ocr_engine(config: &PipelineConfig) -> Box<dyn OcrEngine + Send + Sync> {
    Box::new(TesseractCli::from_config(config))
}
