use serde::Serialize;
use std::path::PathBuf;

/// A page that could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageFailure {
    pub page: u32,
    pub reason: String,
}

/// Result of splitting one source document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SplitOutcome {
    pub source: PathBuf,
    pub page_count: u32,
    pub pages_written: u32,
    pub pages_skipped: u32,
    pub failed_pages: Vec<PageFailure>,
    /// Output file names (written or already present), in page order.
    pub outputs: Vec<String>,
}

impl SplitOutcome {
    pub fn failed_indices(&self) -> Vec<u32> {
        self.failed_pages.iter().map(|f| f.page).collect()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentFailure {
    pub source: PathBuf,
    pub kind: &'static str,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchPageFailure {
    pub source: PathBuf,
    pub page: u32,
    pub reason: String,
}

/// Totals for a whole batch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub documents_attempted: usize,
    pub documents_completed: usize,
    pub pages_written: u64,
    pub pages_skipped: u64,
    pub failed_documents: Vec<DocumentFailure>,
    pub failed_pages: Vec<BatchPageFailure>,
    pub outputs: Vec<String>,
}

impl BatchReport {
    pub fn record(&mut self, outcome: SplitOutcome) {
        self.documents_attempted += 1;
        self.documents_completed += 1;
        self.pages_written += u64::from(outcome.pages_written);
        self.pages_skipped += u64::from(outcome.pages_skipped);
        for failure in outcome.failed_pages {
            self.failed_pages.push(BatchPageFailure {
                source: outcome.source.clone(),
                page: failure.page,
                reason: failure.reason,
            });
        }
        self.outputs.extend(outcome.outputs);
    }

    pub fn record_failure(&mut self, failure: DocumentFailure) {
        self.documents_attempted += 1;
        self.failed_documents.push(failure);
    }

    pub fn is_clean(&self) -> bool {
        self.failed_documents.is_empty() && self.failed_pages.is_empty()
    }

    /// Human-readable summary for stdout.
    pub fn summary(&self) -> String {
        let mut out = format!(
            "Processed {} of {} document(s): {} page(s) written, {} skipped",
            self.documents_completed,
            self.documents_attempted,
            self.pages_written,
            self.pages_skipped
        );
        for doc in &self.failed_documents {
            out.push_str(&format!("\nFAILED {}: {}", doc.source.display(), doc.error));
        }
        for page in &self.failed_pages {
            out.push_str(&format!(
                "\nFAILED {} page {}: {}",
                page.source.display(),
                page.page,
                page.reason
            ));
        }
        out
    }
}
