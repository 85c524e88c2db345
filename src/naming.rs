use serde::Deserialize;
use std::path::Path;

/// Minimum width of the zero-padded page index.
pub const DEFAULT_PAGE_WIDTH: usize = 3;

/// How the base name is taken from the source path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BaseName {
    /// Full file name, extension included (`Vol 3.pdf` -> `Vol 3.pdfpage_001.pdf`).
    #[default]
    FileName,
    /// File name with a trailing `.pdf` removed (`Vol 3.pdf` -> `Vol 3page_001.pdf`).
    Stem,
}

/// Width of the page index in output names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    /// Always three digits; volumes past 999 pages stop sorting lexically.
    #[default]
    Fixed,
    /// Three digits, or as many as the page count needs.
    Auto,
}

impl Padding {
    pub fn width(self, page_count: u32) -> usize {
        match self {
            Padding::Fixed => DEFAULT_PAGE_WIDTH,
            Padding::Auto => DEFAULT_PAGE_WIDTH.max(digits(page_count)),
        }
    }
}

fn digits(n: u32) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Naming rules for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NamingScheme {
    pub base_name: BaseName,
    pub padding: Padding,
}

impl NamingScheme {
    pub fn base_name(&self, source: &Path) -> String {
        base_name(source, self.base_name)
    }

    /// Output file name for `page` of a source with `page_count` pages.
    pub fn file_name(&self, base: &str, page: u32, page_count: u32) -> String {
        output_filename(base, page, self.padding.width(page_count))
    }
}

/// Strip the directory from `source`, and the `.pdf` suffix too when asked.
///
/// Names that don't end in `.pdf` are kept whole.
pub fn base_name(source: &Path, rule: BaseName) -> String {
    let file_name = source
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string_lossy().into_owned());

    match rule {
        BaseName::FileName => file_name,
        BaseName::Stem => {
            let len = file_name.len();
            if len > 4 && file_name.is_char_boundary(len - 4) {
                let (stem, ext) = file_name.split_at(len - 4);
                if ext.eq_ignore_ascii_case(".pdf") {
                    return stem.to_string();
                }
            }
            file_name
        }
    }
}

/// `{base}page_{page:0width}.pdf`, with nothing between the base name and `page_`.
pub fn output_filename(base: &str, page: u32, width: usize) -> String {
    format!("{}page_{:0width$}.pdf", base, page, width = width)
}
