use crate::config::{ExportConfig, ExportFormat};
use crate::core::score::Assessment;
use crate::utils::fs as fs_utils;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub mod json;
pub mod markdown;
pub mod text;

/// Everything an exporter needs to produce one result document.
pub struct ExportDocument<'a> {
    pub assessment: &'a Assessment,
    pub max_score: u32,
    pub config: &'a ExportConfig,
}

pub trait Exporter {
    fn name(&self) -> &'static str;
    fn extension(&self) -> &'static str;
    fn render(&self, doc: &ExportDocument<'_>) -> Result<String>;
}

pub fn exporter_for(format: ExportFormat) -> Box<dyn Exporter> {
    match format {
        ExportFormat::Markdown => Box::new(markdown::MarkdownExporter),
        ExportFormat::Text => Box::new(text::TextExporter),
        ExportFormat::Json => Box::new(json::JsonExporter),
    }
}

/// Picks the explicit format, then the path's extension, then the config default.
pub fn resolve_format(explicit: Option<ExportFormat>, path: &Path, cfg: &ExportConfig) -> ExportFormat {
    explicit
        .or_else(|| ExportFormat::from_path(path))
        .unwrap_or(cfg.format)
}

/// Writes the rendered document to `path`. A path without an extension gets
/// the exporter's one; an extension no exporter writes is rejected. Returns
/// the path written.
pub fn export_to_file(doc: &ExportDocument<'_>, format: ExportFormat, path: &Path) -> Result<PathBuf> {
    if let Some(ext) = path.extension()
        && ExportFormat::from_path(path).is_none()
    {
        bail!(
            "cannot export to {}: unsupported extension .{} (use .md, .txt or .json)",
            path.display(),
            ext.to_string_lossy()
        );
    }

    let exporter = exporter_for(format);
    let path = fs_utils::with_default_extension(path, exporter.extension());
    let content = exporter
        .render(doc)
        .with_context(|| format!("failed rendering {} document", exporter.name()))?;

    fs_utils::ensure_parent_dir(&path)?;
    fs::write(&path, content).with_context(|| format!("failed writing {}", path.display()))?;
    info!(path = %path.display(), format = exporter.name(), "result exported");
    Ok(path)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::bands::Band;

    pub fn sample_assessment() -> Assessment {
        Assessment {
            score: 64,
            band: Band::Moderate,
            message: "Your well-being score indicates moderate well-being.".to_string(),
            advice: vec![
                "Move a little every day.".to_string(),
                "Call a friend.".to_string(),
            ],
        }
    }
}
