pub mod answers;
pub mod bands;
pub mod error;
pub mod report;
pub mod score;
pub mod session;

use crate::config::Config;
use crate::core::answers::{AnswerSet, QUESTION_COUNT};
use crate::core::bands::Ladder;
use crate::core::score::Scorer;
use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

/// Builds the scorer for a loaded config, rejecting invalid scales and ladders.
pub fn build_scorer(cfg: &Config) -> Result<Scorer> {
    let scale = cfg.scale;
    if scale.min >= scale.max {
        bail!("[scale] min ({}) must be lower than max ({})", scale.min, scale.max);
    }
    if scale.max > answers::Scale::CEILING {
        bail!(
            "[scale] max ({}) must not exceed {}",
            scale.max,
            answers::Scale::CEILING
        );
    }

    let ladder = if cfg.bands.is_empty() {
        Ladder::preset(cfg.general.ladder)
    } else {
        Ladder::new(cfg.bands.clone()).context("invalid [[bands]] table in config")?
    };

    let scorer = Scorer::new(scale, ladder);
    let (min, max) = scorer.score_range();
    for band in scorer.ladder().unreachable_bands(min, max) {
        warn!(%band, min, max, "band can never be reached with this scale");
    }
    debug!(scale = %scale, bands = scorer.ladder().rows().len(), "scorer ready");

    Ok(scorer)
}

/// Parses positional ratings where `-` marks an unanswered question.
pub fn parse_ratings(scorer: &Scorer, raw: &[String]) -> Result<AnswerSet> {
    if raw.len() != QUESTION_COUNT {
        bail!(
            "expected {} ratings, got {} (use - for an unanswered question)",
            QUESTION_COUNT,
            raw.len()
        );
    }

    let mut answers = AnswerSet::new(scorer.scale());
    for (index, value) in raw.iter().enumerate() {
        let value = value.trim();
        if value == "-" {
            continue;
        }
        let Ok(rating) = value.parse::<u8>() else {
            bail!(
                "question {}: '{}' is not a rating (expected {})",
                index + 1,
                value,
                scorer.scale()
            );
        };
        answers.set_answer(index, rating)?;
    }

    Ok(answers)
}
