//! Decodes uploaded resume bytes to plain text.
//!
//! PDF goes through `pdf-extract`. DOCX is a zip archive; the text runs of
//! `word/document.xml` are read directly, one output line per paragraph.

use std::io::{Cursor, Read};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const DOCX_BODY: &str = "word/document.xml";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported file format. Use PDF or DOCX. (got '{0}')")]
    UnsupportedFormat(String),

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Could not read DOCX: {0}")]
    Docx(String),
}

/// Supported upload formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    pub fn from_filename(filename: &str) -> Result<Self, DecodeError> {
        let lower = filename.trim().to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if lower.ends_with(".docx") {
            Ok(DocumentFormat::Docx)
        } else {
            Err(DecodeError::UnsupportedFormat(filename.to_string()))
        }
    }
}

/// Decodes an uploaded file into plain text.
pub fn decode(filename: &str, bytes: &[u8]) -> Result<String, DecodeError> {
    match DocumentFormat::from_filename(filename)? {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
    }
}

fn extract_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodeError::Pdf(e.to_string()))
}

fn extract_docx(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| DecodeError::Docx(e.to_string()))?;
    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY)
        .map_err(|e| DecodeError::Docx(format!("{DOCX_BODY}: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| DecodeError::Docx(e.to_string()))?;
    Ok(docx_xml_to_text(&xml))
}

fn text_run_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // <w:t> or <w:t xml:space="preserve">, but not <w:tab/> or <w:tbl>
        Regex::new(r"<w:t(?:\s[^>]*)?>([^<]*)</w:t>").expect("static regex")
    })
}

/// Joins the `<w:t>` runs of each `<w:p>` paragraph into one line.
fn docx_xml_to_text(xml: &str) -> String {
    xml.split("</w:p>")
        .map(|paragraph| {
            text_run_pattern()
                .captures_iter(paragraph)
                .filter_map(|c| c.get(1))
                .map(|m| unescape_xml(m.as_str()))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_end()
        .to_string()
}

fn unescape_xml(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
