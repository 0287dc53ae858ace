//! In-memory PDF fixtures for tests. Each page is a list of text lines; every
//! line is written in its own text object so the text layer emits one line each.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::NamedTempFile;

pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let y = 750 - (i as i64) * 16;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 11.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content stream"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("serialize fixture pdf");
    bytes
}

/// Writes a fixture PDF to a temp file that is removed on drop.
pub fn write_pdf(pages: &[&[&str]]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp pdf");
    std::io::Write::write_all(&mut file, &build_pdf(pages)).expect("write temp pdf");
    file
}

/// Re-points the `/Contents` of page `index` (0-based) at a Flate stream of
/// bytes that do not inflate. The rest of the document is left intact.
pub fn corrupt_page_contents(bytes: &[u8], index: usize) -> Vec<u8> {
    let mut doc = Document::load_mem(bytes).expect("load fixture pdf");
    let page_id = *doc
        .get_pages()
        .values()
        .nth(index)
        .expect("page to corrupt exists");
    let garbage_id = doc.add_object(Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        b"\x00\x13not deflate data\xff\xfe".to_vec(),
    ));
    doc.get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .expect("page dictionary")
        .set("Contents", garbage_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("serialize corrupted pdf");
    out
}
