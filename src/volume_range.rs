use anyhow::{anyhow, bail, Result};
use regex::Regex;
use std::sync::OnceLock;

/// A run of volume numbers such as "4", "1-20" or "20-1".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeRange {
    pub start: u32,
    pub end: Option<u32>,
}

impl VolumeRange {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("Empty volume range"));
        }

        if let Some(dash_pos) = s.find('-') {
            if dash_pos == 0 {
                return Err(anyhow!("Invalid volume range: {}", s));
            }

            let start = parse_volume(&s[..dash_pos])?;
            let end = parse_volume(&s[dash_pos + 1..])?;
            Ok(VolumeRange {
                start,
                end: Some(end),
            })
        } else {
            Ok(VolumeRange {
                start: parse_volume(s)?,
                end: None,
            })
        }
    }

    /// Volume numbers in the order written; "5-3" counts down.
    pub fn expand(&self) -> Vec<u32> {
        let end = self.end.unwrap_or(self.start);
        if self.start <= end {
            (self.start..=end).collect()
        } else {
            (end..=self.start).rev().collect()
        }
    }
}

fn parse_volume(s: &str) -> Result<u32> {
    let s = s.trim();
    let n = s
        .parse::<u32>()
        .map_err(|_| anyhow!("Invalid volume number: {:?}", s))?;
    if n == 0 {
        bail!("Volume numbers must be >= 1");
    }
    Ok(n)
}

/// Expand a list like "1-5,8,10-12" into volume numbers, keeping the written order.
pub fn expand_volume_ranges(s: &str) -> Result<Vec<u32>> {
    let mut volumes = Vec::new();
    for part in s.split(',') {
        volumes.extend(VolumeRange::parse(part)?.expand());
    }
    Ok(volumes)
}

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{n(?::0(\d+))?\}").expect("valid placeholder regex"))
}

/// Fill `{n}` (or `{n:03}` for zero padding) in a source path template.
pub fn render_template(template: &str, volume: u32) -> Result<String> {
    let re = placeholder();
    if !re.is_match(template) {
        bail!("Template has no {{n}} placeholder: {}", template);
    }

    let rendered = re.replace_all(template, |caps: &regex::Captures| {
        let width = caps
            .get(1)
            .and_then(|w| w.as_str().parse::<usize>().ok())
            .unwrap_or(0);
        format!("{:0width$}", volume, width = width)
    });
    Ok(rendered.into_owned())
}

/// Render `template` once per volume listed in `ranges`.
pub fn expand_template(template: &str, ranges: &str) -> Result<Vec<String>> {
    expand_volume_ranges(ranges)?
        .into_iter()
        .map(|n| render_template(template, n))
        .collect()
}
