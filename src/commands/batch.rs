use crate::commands::split;
use crate::config::BatchConfig;
use crate::report::{BatchReport, DocumentFailure};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{error, info};

/// Split every configured source in order, one document at a time.
///
/// A document that fails is recorded and the batch moves on to the next one.
pub fn run_batch(config: &BatchConfig) -> BatchReport {
    let mut report = BatchReport::default();
    let total = config.sources.len();
    info!(documents = total, output_dir = %config.output_directory.display(), "Starting batch");

    for (index, source) in config.sources.iter().enumerate() {
        info!(source = %source.display(), "Processing {}/{}", index + 1, total);

        match split::split(source, &config.output_directory, &config.options) {
            Ok(outcome) => report.record(outcome),
            Err(e) => {
                error!(source = %source.display(), error = %e, "Document failed");
                report.record_failure(DocumentFailure {
                    source: source.clone(),
                    kind: e.kind(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        attempted = report.documents_attempted,
        completed = report.documents_completed,
        pages = report.pages_written,
        "Batch finished"
    );
    report
}

/// Write output file names, one per line, for the OCR pipeline's manifest input.
pub fn write_manifest<P: AsRef<Path>>(report: &BatchReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("Failed to create manifest: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for name in &report.outputs {
        writeln!(writer, "{}", name)?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write manifest: {}", path.display()))?;
    Ok(())
}

pub fn write_report<P: AsRef<Path>>(report: &BatchReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

/// `volsplit batch`: run, write the optional artifacts, print the summary.
pub fn run(config: &BatchConfig, report_path: Option<&Path>, manifest_path: Option<&Path>) -> Result<()> {
    if config.sources.is_empty() {
        anyhow::bail!("No source documents to process");
    }

    let report = run_batch(config);

    if let Some(path) = report_path {
        write_report(&report, path)?;
    }
    if let Some(path) = manifest_path {
        write_manifest(&report, path)?;
        println!("Wrote {} entries to {}", report.outputs.len(), path.display());
    }

    println!("{}", report.summary());

    if !report.is_clean() {
        anyhow::bail!(
            "{} document(s) and {} page(s) failed",
            report.failed_documents.len(),
            report.failed_pages.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::split::SplitOptions;
    use crate::pdf::fixtures;
    use std::path::PathBuf;

    fn config(output: &Path, sources: Vec<PathBuf>) -> BatchConfig {
        BatchConfig {
            output_directory: output.to_path_buf(),
            sources,
            options: SplitOptions::default(),
        }
    }

    #[test]
    fn test_corrupt_volume_does_not_stop_batch() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sources = vec![
            fixtures::write_pdf(src.path(), "Vol 1.pdf", 3, &[]),
            fixtures::write_garbage(src.path(), "Vol 2.pdf"),
            fixtures::write_pdf(src.path(), "Vol 3.pdf", 2, &[]),
        ];

        let report = run_batch(&config(out.path(), sources.clone()));
        assert_eq!(report.documents_attempted, 3);
        assert_eq!(report.documents_completed, 2);
        assert_eq!(report.pages_written, 5);
        assert_eq!(report.failed_documents.len(), 1);
        assert_eq!(report.failed_documents[0].source, sources[1]);
        assert_eq!(report.failed_documents[0].kind, "source_read");

        assert_eq!(
            report.outputs,
            vec![
                "Vol 1.pdfpage_001.pdf",
                "Vol 1.pdfpage_002.pdf",
                "Vol 1.pdfpage_003.pdf",
                "Vol 3.pdfpage_001.pdf",
                "Vol 3.pdfpage_002.pdf",
            ]
        );
        for name in &report.outputs {
            assert!(out.path().join(name).is_file());
        }
    }

    #[test]
    fn test_missing_volume_is_reported() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sources = vec![
            src.path().join("Vol 9.pdf"),
            fixtures::write_pdf(src.path(), "Vol 10.pdf", 1, &[]),
        ];

        let report = run_batch(&config(out.path(), sources));
        assert_eq!(report.documents_completed, 1);
        assert_eq!(report.failed_documents.len(), 1);
        assert!(report.failed_documents[0].error.contains("Vol 9.pdf"));
    }

    #[test]
    fn test_page_failures_roll_up() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sources = vec![fixtures::write_pdf(src.path(), "Vol 1.pdf", 10, &[7])];

        let report = run_batch(&config(out.path(), sources.clone()));
        assert_eq!(report.documents_completed, 1);
        assert_eq!(report.pages_written, 9);
        assert_eq!(report.failed_pages.len(), 1);
        assert_eq!(report.failed_pages[0].page, 7);
        assert_eq!(report.failed_pages[0].source, sources[0]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_missing_output_directory_fails_each_document() {
        let src = tempfile::tempdir().unwrap();
        let sources = vec![
            fixtures::write_pdf(src.path(), "Vol 1.pdf", 1, &[]),
            fixtures::write_pdf(src.path(), "Vol 2.pdf", 1, &[]),
        ];

        let report = run_batch(&config(&src.path().join("out"), sources));
        assert_eq!(report.documents_attempted, 2);
        assert_eq!(report.documents_completed, 0);
        assert!(report
            .failed_documents
            .iter()
            .all(|f| f.kind == "output_write"));
    }

    #[test]
    fn test_manifest_and_report_files() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let sources = vec![fixtures::write_pdf(src.path(), "Vol 1.pdf", 2, &[])];
        let report = run_batch(&config(out.path(), sources));

        let manifest = src.path().join("pdf_manifest.txt");
        write_manifest(&report, &manifest).unwrap();
        assert_eq!(
            std::fs::read_to_string(&manifest).unwrap(),
            "Vol 1.pdfpage_001.pdf\nVol 1.pdfpage_002.pdf\n"
        );

        let json_path = src.path().join("report.json");
        write_report(&report, &json_path).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(json["pages_written"], 2);
        assert_eq!(json["documents_completed"], 1);
    }

    #[test]
    fn test_run_with_no_sources() {
        let out = tempfile::tempdir().unwrap();
        assert!(run(&config(out.path(), vec![]), None, None).is_err());
    }
}
