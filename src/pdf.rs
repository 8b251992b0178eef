use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// Per-page plain text, in document order.
pub trait PageSource {
    /// `None` for a page without extractable text.
    fn pages(&self) -> Vec<Option<&str>>;
}

/// A PDF whose text has been extracted page by page.
pub struct PdfDocument {
    pages: Vec<String>,
}

impl PdfDocument {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let doc = Self::from_mem(&bytes)?;
        debug!("Extracted {} pages from {}", doc.pages.len(), path.display());
        Ok(doc)
    }

    pub fn from_mem(bytes: &[u8]) -> Result<Self> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| Error::Pdf(e.to_string()))?;
        Ok(PdfDocument { pages })
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

fn non_blank(text: &str) -> Option<&str> {
    Some(text).filter(|t| !t.trim().is_empty())
}

impl PageSource for PdfDocument {
    fn pages(&self) -> Vec<Option<&str>> {
        self.pages.iter().map(|p| non_blank(p)).collect()
    }
}

impl PageSource for [&str] {
    fn pages(&self) -> Vec<Option<&str>> {
        self.iter().map(|p| non_blank(p)).collect()
    }
}

impl PageSource for Vec<String> {
    fn pages(&self) -> Vec<Option<&str>> {
        self.iter().map(|p| non_blank(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_pages_have_no_text() {
        let pages = vec!["1 Rice".to_string(), "  \n ".to_string(), String::new()];
        assert_eq!(pages.pages(), vec![Some("1 Rice"), None, None]);
    }

    #[test]
    fn garbage_is_not_a_pdf() {
        let err = PdfDocument::from_mem(b"definitely not a pdf").err().unwrap();
        assert!(matches!(err, Error::Pdf(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PdfDocument::open("/nonexistent/menu.pdf").err().unwrap();
        assert!(matches!(err, Error::Io(_)));
    }
}
