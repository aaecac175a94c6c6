use crate::core::bands::Band;
use crate::exporters::{ExportDocument, Exporter};
use anyhow::{Context, Result};
use serde::Serialize;

pub struct JsonExporter;

#[derive(Debug, Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    score: u32,
    max_score: u32,
    band: Band,
    message: &'a str,
    advice: &'a [String],
    attribution: &'a str,
}

impl Exporter for JsonExporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn render(&self, doc: &ExportDocument<'_>) -> Result<String> {
        let body = JsonDocument {
            title: &doc.config.title,
            score: doc.assessment.score,
            max_score: doc.max_score,
            band: doc.assessment.band,
            message: &doc.assessment.message,
            advice: &doc.assessment.advice,
            attribution: &doc.config.attribution,
        };
        let mut out = serde_json::to_string_pretty(&body).context("failed to serialize result")?;
        out.push('\n');
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExportConfig;
    use crate::exporters::test_support::sample_assessment;

    #[test]
    fn renders_parseable_document() {
        let assessment = sample_assessment();
        let cfg = ExportConfig::default();
        let doc = ExportDocument {
            assessment: &assessment,
            max_score: 100,
            config: &cfg,
        };

        let out = JsonExporter.render(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["score"], 64);
        assert_eq!(value["band"], "moderate");
        assert_eq!(value["advice"][1], "Call a friend.");
        assert_eq!(value["attribution"], cfg.attribution.as_str());
    }
}
