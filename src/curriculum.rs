use crate::model::Curriculum;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

const BUILTIN: &str = include_str!("../data/curriculum.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format { Json, Toml }

impl Format {
    pub fn from_path(path: &Path) -> Result<Format> {
        match path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            _ => bail!("unsupported curriculum file {} (expected .json or .toml)", path.display()),
        }
    }
}

/// The table shipped with the binary.
pub fn builtin() -> Result<Curriculum> {
    parse(BUILTIN, Format::Toml).context("built-in curriculum is malformed")
}

pub fn load(path: &Path) -> Result<Curriculum> {
    let format = Format::from_path(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("reading curriculum {}", path.display()))?;
    let curriculum = parse(&text, format).with_context(|| format!("parsing curriculum {}", path.display()))?;
    tracing::debug!(path = %path.display(), departments = curriculum.departments.len(), semesters = curriculum.semester_count(), leaves = curriculum.leaf_count(), "loaded curriculum");
    Ok(curriculum)
}

pub fn load_or_builtin(path: Option<&Path>) -> Result<Curriculum> {
    match path { Some(p) => load(p), None => builtin() }
}

pub fn parse(text: &str, format: Format) -> Result<Curriculum> {
    let curriculum: Curriculum = match format {
        Format::Json => serde_json::from_str(text)?,
        Format::Toml => toml::from_str(text)?,
    };
    if curriculum.is_empty() { bail!("curriculum has no departments"); }
    for leaf in curriculum.duplicate_subjects() {
        tracing::warn!(%leaf, "subject listed more than once; its directory is shared");
    }
    Ok(curriculum)
}

pub fn render(curriculum: &Curriculum, format: Format) -> Result<String> {
    let mut text = match format {
        Format::Json => serde_json::to_string_pretty(curriculum)?,
        Format::Toml => toml::to_string_pretty(curriculum)?,
    };
    if !text.ends_with('\n') { text.push('\n'); }
    Ok(text)
}
