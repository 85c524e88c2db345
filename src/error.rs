use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while turning one source volume into single-page files.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The source could not be opened or its page count could not be read.
    #[error("Failed to read source PDF {}: {reason}", .path.display())]
    SourceRead { path: PathBuf, reason: String },

    /// One page of an otherwise readable source could not be extracted.
    #[error("Failed to extract page {page} of {}: {reason}", .path.display())]
    PageExtraction {
        path: PathBuf,
        page: u32,
        reason: String,
    },

    /// The output location could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SplitError {
    pub fn source_read(path: &Path, reason: impl ToString) -> Self {
        SplitError::SourceRead {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn page_extraction(path: &Path, page: u32, reason: impl ToString) -> Self {
        SplitError::PageExtraction {
            path: path.to_path_buf(),
            page,
            reason: reason.to_string(),
        }
    }

    pub fn output_write(path: &Path, source: std::io::Error) -> Self {
        SplitError::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Short name used in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            SplitError::SourceRead { .. } => "source_read",
            SplitError::PageExtraction { .. } => "page_extraction",
            SplitError::OutputWrite { .. } => "output_write",
        }
    }
}
