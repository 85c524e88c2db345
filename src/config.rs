use crate::commands::split::SplitOptions;
use crate::naming::{BaseName, NamingScheme, Padding};
use crate::sources::discover;
use crate::volume_range::expand_template;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// On-disk TOML batch configuration. Every field is optional so command-line
/// flags can fill in or override the rest.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub output_directory: Option<PathBuf>,
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub volumes: Option<VolumesConfig>,
    pub limit: Option<usize>,
    pub skip_existing: Option<bool>,
    pub strip_extension: Option<bool>,
    pub padding: Option<Padding>,
}

/// Numbered volumes, e.g. `template = "Vol {n}.pdf"`, `range = "1-20"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumesConfig {
    pub template: Option<String>,
    pub range: Option<String>,
}

/// Values given on the command line; these win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output_directory: Option<PathBuf>,
    pub sources: Vec<PathBuf>,
    pub source_dir: Option<PathBuf>,
    pub template: Option<String>,
    pub volumes: Option<String>,
    pub limit: Option<usize>,
    pub skip_existing: bool,
    pub strip_extension: bool,
    pub auto_padding: bool,
}

/// Everything the batch runner needs: where to write and what to read, in order.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output_directory: PathBuf,
    pub sources: Vec<PathBuf>,
    pub options: SplitOptions,
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<ConfigFile> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
}

/// Merge the config file with command-line values and build the source list.
///
/// Sources are ordered: explicit paths, then template volumes, then the
/// discovered directory contents. `limit` truncates the result.
pub fn resolve(file: ConfigFile, cli: Overrides) -> Result<BatchConfig> {
    let Some(output_directory) = cli.output_directory.or(file.output_directory) else {
        bail!("No output directory given (use --output-dir or output_directory in the config)");
    };

    let mut sources = file.sources;
    sources.extend(cli.sources);

    let volumes = file.volumes.unwrap_or_default();
    match (cli.template.or(volumes.template), cli.volumes.or(volumes.range)) {
        (Some(template), Some(range)) => {
            let rendered = expand_template(&template, &range)
                .with_context(|| format!("Invalid volume list {:?}", range))?;
            sources.extend(rendered.into_iter().map(PathBuf::from));
        }
        (Some(_), None) => bail!("A volume template needs a volume range"),
        (None, Some(_)) => bail!("A volume range needs a volume template"),
        (None, None) => {}
    }

    if let Some(dir) = cli.source_dir.or(file.source_dir) {
        sources.extend(discover(&dir)?);
    }

    if let Some(limit) = cli.limit.or(file.limit) {
        sources.truncate(limit);
    }

    let base_name = if cli.strip_extension || file.strip_extension.unwrap_or(false) {
        BaseName::Stem
    } else {
        BaseName::FileName
    };
    let padding = if cli.auto_padding {
        Padding::Auto
    } else {
        file.padding.unwrap_or_default()
    };

    Ok(BatchConfig {
        output_directory,
        sources,
        options: SplitOptions {
            naming: NamingScheme { base_name, padding },
            skip_existing: cli.skip_existing || file.skip_existing.unwrap_or(false),
        },
    })
}
