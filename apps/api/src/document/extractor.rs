//! Page text excerpts: the prompt context half of the ingestion pipeline.

use std::path::Path;

use tracing::debug;

use crate::document::{Document, DocumentOpenError};

/// Text substituted for a requested page that the document does not have.
pub fn out_of_range_placeholder(index: i64) -> String {
    format!("Page {index} is out of range.")
}

/// Opens `source` and returns the text of `page_indices`, in request order,
/// joined with single newlines.
///
/// Fails only when the document itself cannot be opened. Out-of-range indices
/// (including negative ones) produce a placeholder segment instead of an error.
pub fn extract_pages(source: &Path, page_indices: &[i64]) -> Result<String, DocumentOpenError> {
    let doc = Document::open(source)?;
    Ok(extract_from_document(&doc, page_indices))
}

/// Same as [`extract_pages`] on an already opened document.
pub fn extract_from_document(doc: &Document, page_indices: &[i64]) -> String {
    debug!(
        "Extracting {} page(s) from a {}-page document",
        page_indices.len(),
        doc.page_count()
    );
    page_indices
        .iter()
        .map(|&index| {
            usize::try_from(index)
                .ok()
                .and_then(|i| doc.page(i))
                .map(|page| page.text())
                .unwrap_or_else(|| out_of_range_placeholder(index))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses a comma-separated page window such as `"0,1,2"`.
/// Blank entries are skipped; anything else that is not an integer is rejected.
pub fn parse_page_list(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("'{s}' is not a valid page index"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::test_pdf::{build_pdf, corrupt_page_contents, write_pdf};

    fn three_page_doc() -> Document {
        Document::from_bytes(&build_pdf(&[&["Page A"], &["Page B"], &["Page C"]])).unwrap()
    }

    #[test]
    fn test_segments_follow_request_order() {
        let doc = three_page_doc();
        let text = extract_from_document(&doc, &[2, 0, 1]);
        assert_eq!(text, "Page C\nPage A\nPage B");
    }

    #[test]
    fn test_duplicate_indices_are_reextracted() {
        let doc = three_page_doc();
        let text = extract_from_document(&doc, &[1, 1]);
        assert_eq!(text.split('\n').collect::<Vec<_>>(), vec!["Page B", "Page B"]);
    }

    #[test]
    fn test_out_of_range_indices_become_placeholders() {
        let doc = three_page_doc();
        let text = extract_from_document(&doc, &[0, 3, -1]);
        assert_eq!(
            text.split('\n').collect::<Vec<_>>(),
            vec![
                "Page A",
                "Page 3 is out of range.",
                "Page -1 is out of range."
            ]
        );
    }

    #[test]
    fn test_segment_count_matches_request_length() {
        let doc = three_page_doc();
        let indices = [0, 1, 2, 5, 0, 7];
        let text = extract_from_document(&doc, &indices);
        assert_eq!(text.split('\n').count(), indices.len());
    }

    #[test]
    fn test_empty_page_keeps_its_segment() {
        let doc = Document::from_bytes(&build_pdf(&[&["Cover"], &[], &["Back"]])).unwrap();
        let text = extract_from_document(&doc, &[0, 1, 2]);
        assert_eq!(text.split('\n').collect::<Vec<_>>(), vec!["Cover", "", "Back"]);
    }

    #[test]
    fn test_undecodable_page_becomes_empty_segment() {
        let bytes = corrupt_page_contents(&build_pdf(&[&["Good"], &["Lost"]]), 1);
        let doc = Document::from_bytes(&bytes).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(extract_from_document(&doc, &[0, 1]), "Good\n");
    }

    #[test]
    fn test_empty_request_yields_empty_text() {
        let doc = three_page_doc();
        assert_eq!(extract_from_document(&doc, &[]), "");
    }

    #[test]
    fn test_extract_pages_from_file() {
        let file = write_pdf(&[&["Only page"]]);
        let text = extract_pages(file.path(), &[0, 1, 2]).unwrap();
        assert_eq!(
            text,
            "Only page\nPage 1 is out of range.\nPage 2 is out of range."
        );
    }

    #[test]
    fn test_extract_pages_missing_source_is_an_error() {
        let result = extract_pages(Path::new("/no/such/upload.pdf"), &[0]);
        assert!(matches!(result, Err(DocumentOpenError::NotFound(_))));
    }

    #[test]
    fn test_extract_pages_corrupt_source_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"plain text, not a pdf").unwrap();
        let result = extract_pages(file.path(), &[0]);
        assert!(matches!(result, Err(DocumentOpenError::Malformed(_))));
    }

    #[test]
    fn test_parse_page_list() {
        assert_eq!(parse_page_list("0,1,2").unwrap(), vec![0, 1, 2]);
        assert_eq!(parse_page_list(" 3 , ,-1").unwrap(), vec![3, -1]);
        assert!(parse_page_list("").unwrap().is_empty());
        assert!(parse_page_list("1,two").is_err());
    }
}
