use crate::core::answers::{QUESTIONS, Scale};
use crate::core::bands::{Band, BandInterval};
use crate::core::score::{Assessment, Scorer};
use colored::Colorize;
use serde::Serialize;

pub fn colored_band(band: Band) -> String {
    let label = band.label();
    match band {
        Band::VeryPoor => label.red().bold().to_string(),
        Band::Poor => label.yellow().bold().to_string(),
        Band::Moderate => label.blue().bold().to_string(),
        Band::Good => label.green().bold().to_string(),
        Band::Excellent => label.bright_green().bold().to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub score: u32,
    pub max_score: u32,
    pub band: Band,
    pub message: String,
    pub advice: Vec<String>,
}

impl JsonReport {
    pub fn new(assessment: &Assessment, scorer: &Scorer) -> Self {
        Self {
            score: assessment.score,
            max_score: scorer.score_range().1,
            band: assessment.band,
            message: assessment.message.clone(),
            advice: assessment.advice.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LadderReport {
    pub scale: Scale,
    pub min_score: u32,
    pub max_score: u32,
    pub bands: Vec<BandInterval>,
}

impl From<&Scorer> for LadderReport {
    fn from(scorer: &Scorer) -> Self {
        let (min_score, max_score) = scorer.score_range();
        Self {
            scale: scorer.scale(),
            min_score,
            max_score,
            bands: scorer.ladder().intervals(),
        }
    }
}

pub fn render_human(assessment: &Assessment, scorer: &Scorer) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Well-being Score: {}/{} ({})\n",
        assessment.score,
        scorer.score_range().1,
        colored_band(assessment.band)
    ));
    out.push('\n');
    out.push_str(&assessment.message);
    out.push('\n');

    if !assessment.advice.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", "Advice".bold()));
        for (index, line) in assessment.advice.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", index + 1, line));
        }
    }

    out
}

pub fn print_human(assessment: &Assessment, scorer: &Scorer) {
    print!("{}", render_human(assessment, scorer));
}

pub fn render_questions(scale: Scale) -> String {
    let mut out = format!(
        "Rate how often each statement applied to you over the last two weeks ({} = never, {} = all of the time):\n",
        scale.min, scale.max
    );
    for (index, question) in QUESTIONS.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, question));
    }
    let ratings: Vec<String> = scale.ratings().map(|rating| rating.to_string()).collect();
    out.push_str(&format!("ratings: {}\n", ratings.join(" ")));
    out
}

pub fn print_ladder(report: &LadderReport) {
    println!(
        "scale {} -> score {}..={}",
        report.scale, report.min_score, report.max_score
    );
    for interval in &report.bands {
        let from = interval.from.unwrap_or(report.min_score).max(report.min_score);
        let range = match interval.to {
            Some(to) => format!("{}..={}", from, to),
            None => format!("{}..={}", from, report.max_score),
        };
        let unreachable = if interval.is_empty_within(report.min_score, report.max_score) {
            " (unreachable)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("{:>9}  {}{}", range, colored_band(interval.band), unreachable);
    }
}
