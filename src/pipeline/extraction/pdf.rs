use std::panic::{self, AssertUnwindSafe};

use super::types::{PageText, PdfExtractor};
use super::ExtractionError;
use crate::pipeline::import::FileFormat;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital PDFs with embedded text layers; scanned pages yield no text.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        // pdf-extract panics on some malformed streams instead of returning Err
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        }));

        let page_texts = match outcome {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => return Err(ExtractionError::unreadable(FileFormat::Pdf, e.to_string())),
            Err(_) => {
                tracing::warn!(bytes = pdf_bytes.len(), "PDF parser panicked on malformed input");
                return Err(ExtractionError::unreadable(
                    FileFormat::Pdf,
                    "malformed PDF stream",
                ));
            }
        };

        Ok(page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText {
                page_number: i + 1,
                text,
            })
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Generate a valid PDF with one text line per page using lopdf
    /// (the library pdf-extract uses internally).
    pub(crate) fn make_test_pdf(page_lines: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::new();

        for line in page_lines {
            let content = if line.is_empty() {
                String::new()
            } else {
                format!("BT /F1 12 Tf 72 720 Td ({line}) Tj ET")
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! {
                        "F1" => font_id,
                    },
                },
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn extract_text_from_digital_pdf() {
        let pdf_bytes = make_test_pdf(&["Hemoglobin 13.5 g/dL"]);
        let pages = PdfTextExtractor.extract_pages(&pdf_bytes).unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert!(
            pages[0].text.contains("Hemoglobin"),
            "Expected page text to contain 'Hemoglobin', got: {:?}",
            pages[0].text
        );
    }

    #[test]
    fn one_entry_per_page_in_order() {
        let pdf_bytes = make_test_pdf(&["Patient Name: Jane Doe", "Ferritin 85 ng/mL"]);
        let pages = PdfTextExtractor.extract_pages(&pdf_bytes).unwrap();

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 2);
        assert!(pages[0].text.contains("Jane Doe"));
        assert!(pages[1].text.contains("Ferritin"));
    }

    #[test]
    fn invalid_pdf_returns_unreadable() {
        let result = PdfTextExtractor.extract_pages(b"not a pdf");
        assert!(matches!(
            result,
            Err(ExtractionError::UnreadableFile { format: FileFormat::Pdf, .. })
        ));
    }

    #[test]
    fn truncated_pdf_returns_unreadable() {
        let pdf_bytes = make_test_pdf(&["Sodium 140 mmol/L"]);
        let truncated = &pdf_bytes[..pdf_bytes.len() / 4];
        assert!(PdfTextExtractor.extract_pages(truncated).is_err());
    }
}
