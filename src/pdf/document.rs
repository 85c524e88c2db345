use crate::error::SplitError;
use lopdf::{Document, Object, ObjectId};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct PdfDocument {
    pub doc: Document,
    pub path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SplitError> {
        let path = path.as_ref();
        let mut doc = Document::load(path).map_err(|e| SplitError::source_read(path, e))?;

        // lopdf already tried the empty user password and keeps /Encrypt even when it worked
        if doc.is_encrypted() {
            if doc.encryption_state.is_none() {
                return Err(SplitError::source_read(
                    path,
                    "document is encrypted and no usable password is available",
                ));
            }
            // Objects are decrypted in memory; page files are written unencrypted
            doc.trailer.remove(b"Encrypt");
            doc.encryption_state = None;
        }

        Ok(Self::from_document(doc, path))
    }

    pub fn from_document<P: AsRef<Path>>(doc: Document, path: P) -> Self {
        PdfDocument {
            doc,
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get 1-indexed page object IDs
    pub fn page_ids(&self) -> Vec<(u32, ObjectId)> {
        let mut pages: Vec<_> = self.doc.get_pages().into_iter().collect();
        pages.sort_by_key(|(num, _)| *num);
        pages
    }

    /// Extract a single page into a new document.
    ///
    /// The page keeps its original content streams and resources; nothing is
    /// re-rendered. Objects only reachable from other pages are dropped.
    pub fn extract_page(&self, page: u32) -> Result<Document, SplitError> {
        let all_pages = self.page_ids();
        let total = all_pages.len() as u32;

        let page_id = all_pages
            .iter()
            .find(|(num, _)| *num == page)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                SplitError::page_extraction(
                    &self.path,
                    page,
                    format!("page is out of range (1-{})", total),
                )
            })?;

        self.check_page(page, page_id)?;

        let pages_to_delete: Vec<u32> = all_pages
            .iter()
            .filter(|(num, _)| *num != page)
            .map(|(num, _)| *num)
            .collect();

        let mut new_doc = self.doc.clone();
        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }
        new_doc.prune_objects();

        Ok(new_doc)
    }

    /// Make sure the page object and every content stream it points at resolve.
    fn check_page(&self, page: u32, page_id: ObjectId) -> Result<(), SplitError> {
        let dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| SplitError::page_extraction(&self.path, page, e))?;

        let contents = match dict.get(b"Contents") {
            Ok(contents) => contents,
            // A page without content is blank, not broken
            Err(_) => return Ok(()),
        };

        match contents {
            Object::Reference(id) => self.check_content_stream(page, *id),
            Object::Stream(_) => Ok(()),
            Object::Array(items) => {
                for item in items {
                    match item {
                        Object::Reference(id) => self.check_content_stream(page, *id)?,
                        Object::Stream(_) => {}
                        _ => {
                            return Err(SplitError::page_extraction(
                                &self.path,
                                page,
                                "/Contents array holds a non-stream entry",
                            ))
                        }
                    }
                }
                Ok(())
            }
            _ => Err(SplitError::page_extraction(
                &self.path,
                page,
                "/Contents is neither a stream nor an array",
            )),
        }
    }

    fn check_content_stream(&self, page: u32, id: ObjectId) -> Result<(), SplitError> {
        self.doc
            .get_object(id)
            .and_then(Object::as_stream)
            .map(|_| ())
            .map_err(|e| {
                SplitError::page_extraction(
                    &self.path,
                    page,
                    format!("content stream {} {} R: {}", id.0, id.1, e),
                )
            })
    }

    /// Save to a file. The parent directory must already exist.
    ///
    /// The document is written to a `.part` sibling and renamed into place, so
    /// `path` only ever holds a complete file.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<(), SplitError> {
        let path = path.as_ref();
        let part = part_path(path);

        let result = File::create(&part)
            .map_err(|e| SplitError::output_write(path, e))
            .and_then(|file| Self::write_to(doc, file, path))
            .and_then(|()| {
                std::fs::rename(&part, path).map_err(|e| SplitError::output_write(path, e))
            });

        if result.is_err() {
            // May not exist if the create itself failed
            let _ = std::fs::remove_file(&part);
        }
        result
    }

    /// Serialize `doc` into `target`, reporting flush failures as well.
    pub fn write_to<W: Write>(doc: &mut Document, target: W, path: &Path) -> Result<(), SplitError> {
        let mut writer = BufWriter::new(target);
        doc.save_to(&mut writer)
            .map_err(|e| SplitError::output_write(path, e))?;
        writer
            .flush()
            .map_err(|e| SplitError::output_write(path, e))?;
        Ok(())
    }
}

fn part_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
