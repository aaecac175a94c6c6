use crate::exporters::{ExportDocument, Exporter};
use anyhow::Result;

pub struct TextExporter;

impl Exporter for TextExporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<String> {
        let assessment = doc.assessment;
        let title = &doc.config.title;
        let mut out = format!("{}\n{}\n\n", title, "=".repeat(title.chars().count()));
        out.push_str(&format!(
            "Your well-being score is: {}/{}\n",
            assessment.score, doc.max_score
        ));
        out.push_str(&format!("Category: {}\n\n", assessment.band.label()));
        out.push_str(&format!("{}\n\n", assessment.message));
        out.push_str("Advice:\n");
        for (index, line) in assessment.advice.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", index + 1, line));
        }
        out.push_str(&format!("\n{}\n", doc.config.attribution));
        Ok(out)
    }
}
