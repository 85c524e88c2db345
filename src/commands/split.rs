use crate::error::SplitError;
use crate::naming::NamingScheme;
use crate::pdf::PdfDocument;
use crate::report::{PageFailure, SplitOutcome};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
    pub naming: NamingScheme,
    /// Leave non-empty output files from an earlier run in place.
    pub skip_existing: bool,
}

/// Write one single-page PDF per page of `input` into `output_dir`.
///
/// The directory must already exist. A page that cannot be extracted is
/// recorded in the outcome and the remaining pages still get written; an
/// unreadable source or a failed write ends the document with an error.
pub fn split<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &SplitOptions,
) -> Result<SplitOutcome, SplitError> {
    let input = input.as_ref();
    let output_dir = output_dir.as_ref();

    ensure_output_dir(output_dir)?;

    info!(source = %input.display(), "Splitting document");
    let doc = PdfDocument::open(input)?;
    split_document(&doc, output_dir, options)
}

pub fn split_document(
    doc: &PdfDocument,
    output_dir: &Path,
    options: &SplitOptions,
) -> Result<SplitOutcome, SplitError> {
    let total_pages = doc.page_count();
    let base = options.naming.base_name(&doc.path);
    info!(source = %doc.path.display(), pages = total_pages, "Total pages");

    let mut outcome = SplitOutcome {
        source: doc.path.clone(),
        page_count: total_pages,
        ..Default::default()
    };

    for page_num in 1..=total_pages {
        let file_name = options.naming.file_name(&base, page_num, total_pages);
        let output_path = output_dir.join(&file_name);

        if options.skip_existing && already_written(&output_path) {
            debug!(page = page_num, output = %output_path.display(), "Already present, skipping");
            outcome.pages_skipped += 1;
            outcome.outputs.push(file_name);
            continue;
        }

        let mut page_doc = match doc.extract_page(page_num) {
            Ok(page_doc) => page_doc,
            Err(e @ SplitError::PageExtraction { .. }) => {
                warn!(source = %doc.path.display(), page = page_num, error = %e, "Skipping page");
                outcome.failed_pages.push(PageFailure {
                    page: page_num,
                    reason: e.to_string(),
                });
                continue;
            }
            Err(e) => return Err(e),
        };

        PdfDocument::save(&mut page_doc, &output_path)?;
        info!(page = page_num, output = %output_path.display(), "Saved page");
        outcome.pages_written += 1;
        outcome.outputs.push(file_name);
    }

    info!(
        source = %doc.path.display(),
        written = outcome.pages_written,
        skipped = outcome.pages_skipped,
        failed = outcome.failed_pages.len(),
        "Finished document"
    );

    Ok(outcome)
}

fn ensure_output_dir(output_dir: &Path) -> Result<(), SplitError> {
    if output_dir.is_dir() {
        return Ok(());
    }
    Err(SplitError::output_write(
        output_dir,
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "output directory does not exist",
        ),
    ))
}

fn already_written(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| m.is_file() && m.len() > 0)
        .unwrap_or(false)
}

/// `volsplit split`: one document, summary on stdout.
pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output_dir: Q,
    options: &SplitOptions,
) -> Result<()> {
    let output_dir = output_dir.as_ref();
    let outcome = split(input, output_dir, options)?;

    println!(
        "Split {} pages into {} ({} written, {} skipped)",
        outcome.page_count,
        output_dir.display(),
        outcome.pages_written,
        outcome.pages_skipped
    );

    if !outcome.failed_pages.is_empty() {
        for failure in &outcome.failed_pages {
            println!("FAILED page {}: {}", failure.page, failure.reason);
        }
        anyhow::bail!(
            "{} page(s) could not be extracted: {:?}",
            outcome.failed_pages.len(),
            outcome.failed_indices()
        );
    }

    Ok(())
}
