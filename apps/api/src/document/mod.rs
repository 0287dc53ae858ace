//! Document loading: the single point where uploaded PDFs are opened.
//!
//! A `Document` is opened once per request from a path, a byte buffer, or a
//! reader, and released when dropped. Pages are addressed by 0-based index.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use lopdf::Document as PdfDocument;
use thiserror::Error;
use tracing::debug;

pub mod extractor;

#[cfg(test)]
pub mod test_pdf;

/// Raised when a document source cannot be opened as a PDF.
/// Individual page failures never surface as this error.
#[derive(Debug, Error)]
pub enum DocumentOpenError {
    #[error("No such file: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read '{}': {}", .path.display(), .source)]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read document stream: {0}")]
    Stream(#[from] std::io::Error),

    #[error("Invalid PDF document: {0}")]
    Malformed(String),
}

/// An opened PDF. Immutable once loaded.
pub struct Document {
    inner: PdfDocument,
    /// lopdf page numbers (1-based) in document order; position = page index.
    page_numbers: Vec<u32>,
}

impl Document {
    /// Opens a document from a file on disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DocumentOpenError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DocumentOpenError::NotFound(path.to_path_buf()),
            _ => DocumentOpenError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        Self::from_reader(file)
    }

    /// Opens a document from an in-memory buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentOpenError> {
        let inner =
            PdfDocument::load_mem(bytes).map_err(|e| DocumentOpenError::Malformed(e.to_string()))?;
        // get_pages() is a BTreeMap keyed by page number, so keys are already ordered.
        let page_numbers: Vec<u32> = inner.get_pages().keys().copied().collect();
        debug!("Opened PDF with {} page(s)", page_numbers.len());
        Ok(Self {
            inner,
            page_numbers,
        })
    }

    /// Opens a document by draining a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, DocumentOpenError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    /// Returns the page at `index`, or `None` when out of range.
    pub fn page(&self, index: usize) -> Option<Page<'_>> {
        self.page_numbers.get(index).map(|&number| Page {
            index,
            number,
            doc: &self.inner,
        })
    }

    /// Iterates pages in document order.
    pub fn pages(&self) -> impl Iterator<Item = Page<'_>> + '_ {
        self.page_numbers
            .iter()
            .enumerate()
            .map(|(index, &number)| Page {
                index,
                number,
                doc: &self.inner,
            })
    }

    /// Full document text: every page's text joined with newlines, in page order.
    pub fn text(&self) -> String {
        self.pages()
            .map(|page| page.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A single page of an opened `Document`.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    index: usize,
    number: u32,
    doc: &'a PdfDocument,
}

impl Page<'_> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Extracts the page's plain text.
    ///
    /// Image-only pages produce an empty string. A page whose content stream
    /// cannot be decoded also degrades to an empty string.
    pub fn text(&self) -> String {
        match self.doc.extract_text(&[self.number]) {
            Ok(text) => text.trim_end_matches(['\n', '\r']).to_string(),
            Err(e) => {
                debug!("Page {} text unavailable: {e}", self.index());
                String::new()
            }
        }
    }
}
