//! Text extraction from PDF and DOCX documents

use crate::error::{Result, ResumeAnalyzerError};
use crate::input::file_detector::DocumentFormat;
use crate::processing::document::{ExtractedText, ResumeDocument};
use crate::processing::text_processor::normalize_unicode;
use docx_rs::{read_docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};
use log::{debug, warn};
use std::panic::{self, AssertUnwindSafe};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText>;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        // pdf-extract panics on some malformed streams instead of returning an error
        let decoded = panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| {
                warn!("PDF decoder panicked; reporting as extraction failure");
                ResumeAnalyzerError::Extraction("PDF decoder aborted on malformed input".to_string())
            })?
            .map_err(|e| ResumeAnalyzerError::Extraction(format!("Failed to extract text from PDF: {}", e)))?;

        let page_count = match lopdf::Document::load_mem(bytes) {
            Ok(doc) => Some(doc.get_pages().len()),
            Err(e) => {
                warn!("Could not count PDF pages: {}", e);
                None
            }
        };
        debug!("Decoded {} characters from {:?} PDF pages", decoded.len(), page_count);

        ExtractedText::new(normalize_unicode(&decoded), page_count)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText> {
        let docx = read_docx(bytes)
            .map_err(|e| ResumeAnalyzerError::Extraction(format!("Failed to read DOCX: {}", e)))?;

        let lines: Vec<String> = docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect();
        debug!("Read {} DOCX paragraphs", lines.len());

        ExtractedText::new(normalize_unicode(&lines.join("\n")), None)
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_paragraph_children(&paragraph.children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

/// Extract the flattened text of a document in the declared format.
pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<ExtractedText> {
    match format {
        DocumentFormat::Pdf => PdfExtractor.extract(bytes),
        DocumentFormat::Docx => DocxExtractor.extract(bytes),
    }
}

impl ResumeDocument {
    pub fn extract(&self) -> Result<ExtractedText> {
        extract_text(self.bytes(), self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use docx_rs::Docx;
    use std::io::Cursor;

    fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let mut cursor = Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn test_docx_paragraphs_one_per_line() {
        let bytes = build_docx(&["Jane Doe", "Skills: Python, SQL"]);
        let text = extract_text(&bytes, DocumentFormat::Docx).unwrap();

        assert_eq!(text.as_str(), "Jane Doe\nSkills: Python, SQL");
        assert_eq!(text.page_count(), None);
    }

    #[test]
    fn test_docx_text_is_normalized() {
        let bytes = build_docx(&["Rust \u{2013} \u{201C}systems\u{201D}"]);
        let text = extract_text(&bytes, DocumentFormat::Docx).unwrap();

        assert_eq!(text.as_str(), "Rust - \"systems\"");
    }

    #[test]
    fn test_empty_docx_is_extraction_error() {
        let bytes = build_docx(&["", "   "]);
        let err = extract_text(&bytes, DocumentFormat::Docx).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExtractionError);
    }

    #[test]
    fn test_corrupt_input_is_extraction_error() {
        let garbage = b"definitely not a document";

        let err = extract_text(garbage, DocumentFormat::Docx).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExtractionError);

        let err = extract_text(garbage, DocumentFormat::Pdf).unwrap_err();
        assert_eq!(err.kind(), FailureKind::ExtractionError);
    }
}
