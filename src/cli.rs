use crate::naming::{BaseName, NamingScheme, Padding};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "volsplit")]
#[command(about = "Split scanned PDF volumes into single-page PDFs for OCR")]
#[command(version)]
pub struct Cli {
    /// Log debug detail (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Copy)]
pub struct NamingArgs {
    /// Drop the ".pdf" suffix from the source name before "page_"
    #[arg(long)]
    pub strip_extension: bool,

    /// Widen the page number past three digits for volumes over 999 pages
    #[arg(long)]
    pub auto_padding: bool,
}

impl NamingArgs {
    pub fn scheme(&self) -> NamingScheme {
        NamingScheme {
            base_name: if self.strip_extension {
                BaseName::Stem
            } else {
                BaseName::FileName
            },
            padding: if self.auto_padding {
                Padding::Auto
            } else {
                Padding::Fixed
            },
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the page count and the output names a split would use
    Info {
        /// PDF file to inspect
        path: PathBuf,

        #[command(flatten)]
        naming: NamingArgs,
    },

    /// Split one PDF into individual pages
    #[command(alias = "burst")]
    Split {
        /// PDF file to split
        path: PathBuf,

        /// Existing output directory
        #[arg(short, long)]
        output_dir: PathBuf,

        /// Keep non-empty page files left by an earlier run
        #[arg(long)]
        skip_existing: bool,

        #[command(flatten)]
        naming: NamingArgs,
    },

    /// Split a list of volumes, continuing past failures
    Batch {
        /// PDF files to split, in order
        sources: Vec<PathBuf>,

        /// TOML batch configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Existing output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Also split every PDF directly inside this directory, sorted by name
        #[arg(long)]
        source_dir: Option<PathBuf>,

        /// Source path template with an {n} placeholder (e.g. "Vol {n}.pdf")
        #[arg(long)]
        template: Option<String>,

        /// Volume numbers for the template (e.g. "1-20,23")
        #[arg(long)]
        volumes: Option<String>,

        /// Only process the first N sources
        #[arg(long)]
        limit: Option<usize>,

        /// Keep non-empty page files left by an earlier run
        #[arg(long)]
        skip_existing: bool,

        #[command(flatten)]
        naming: NamingArgs,

        /// Write the batch report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Write the output file names, one per line
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
}
