use crate::naming::NamingScheme;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

/// What splitting `path` would produce, without writing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPreview {
    pub page_count: u32,
    pub first: Option<String>,
    pub last: Option<String>,
}

pub fn preview<P: AsRef<Path>>(path: P, naming: &NamingScheme) -> Result<SplitPreview> {
    let doc = PdfDocument::open(&path)?;
    let page_count = doc.page_count();
    let base = naming.base_name(path.as_ref());

    let name = |page| naming.file_name(&base, page, page_count);
    Ok(SplitPreview {
        page_count,
        first: (page_count > 0).then(|| name(1)),
        last: (page_count > 1).then(|| name(page_count)),
    })
}

pub fn run<P: AsRef<Path>>(path: P, naming: &NamingScheme) -> Result<()> {
    let preview = preview(&path, naming)?;

    println!("File: {}", path.as_ref().display());
    println!("Pages: {}", preview.page_count);
    if let Some(first) = &preview.first {
        println!("First output: {}", first);
    }
    if let Some(last) = &preview.last {
        println!("Last output: {}", last);
    }

    Ok(())
}
