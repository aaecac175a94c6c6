use crate::exporters::{ExportDocument, Exporter};
use anyhow::Result;

pub struct MarkdownExporter;

impl Exporter for MarkdownExporter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<String> {
        let assessment = doc.assessment;
        let mut out = format!("# {}\n\n", doc.config.title);
        out.push_str(&format!(
            "**Score:** {}/{} ({})\n\n",
            assessment.score,
            doc.max_score,
            assessment.band.label()
        ));
        out.push_str(&format!("{}\n\n", assessment.message));
        out.push_str("## Advice\n\n");
        for (index, line) in assessment.advice.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, line));
        }
        out.push_str(&format!("\n---\n\n_{}_\n", doc.config.attribution));
        Ok(out)
    }
}
