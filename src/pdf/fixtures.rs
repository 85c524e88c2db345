//! Small generated PDFs for tests.

use lopdf::content::{Content, Operation};
use lopdf::encryption::{EncryptionState, EncryptionVersion, Permissions};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};

/// Build a document with `pages` pages, each showing "Page N".
///
/// Pages listed in `broken` point their /Contents at an object that does not exist.
pub fn build(pages: u32, broken: &[u32]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in 1..=pages {
        let contents: Object = if broken.contains(&page) {
            Object::Reference((9_000 + page, 0))
        } else {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(format!("Page {}", page))]),
                    Operation::new("ET", vec![]),
                ],
            };
            let stream = Stream::new(dictionary! {}, content.encode().unwrap());
            doc.add_object(stream).into()
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
        });
        kids.push(page_id.into());
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => pages as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Build and save a document into `dir`.
pub fn write_pdf(dir: &Path, name: &str, pages: u32, broken: &[u32]) -> PathBuf {
    let path = dir.join(name);
    let mut doc = build(pages, broken);
    doc.save(&path).unwrap();
    path
}

/// A file with a .pdf name that is not a PDF.
pub fn write_garbage(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not a pdf, just scanner noise").unwrap();
    path
}

/// Build, encrypt with RC4-128 and save. An empty `user_password` means anyone can open it.
pub fn write_encrypted(dir: &Path, name: &str, pages: u32, user_password: &str) -> PathBuf {
    let path = dir.join(name);
    let mut doc = build(pages, &[]);
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::string_literal(b"volsplit-fixture".to_vec()),
            Object::string_literal(b"volsplit-fixture".to_vec()),
        ]),
    );

    let version = EncryptionVersion::V2 {
        document: &doc,
        owner_password: "owner",
        user_password,
        key_length: 128,
        permissions: Permissions::all(),
    };
    let state = EncryptionState::try_from(version).unwrap();
    doc.encrypt(&state).unwrap();
    doc.save(&path).unwrap();
    path
}
