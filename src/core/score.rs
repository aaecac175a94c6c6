use crate::core::answers::{AnswerSet, QUESTION_COUNT, Scale};
use crate::core::bands::{Band, Ladder};
use crate::core::error::QuizError;
use serde::Serialize;

/// Maps the raw sum of ratings onto the 0-100 scale.
pub const SCORE_FACTOR: u32 = 4;

/// Read-only result of a complete answer set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assessment {
    pub score: u32,
    pub band: Band,
    pub message: String,
    pub advice: Vec<String>,
}

/// Stateless scoring over a fixed scale and ladder.
#[derive(Debug, Clone)]
pub struct Scorer {
    scale: Scale,
    ladder: Ladder,
}

impl Scorer {
    pub fn new(scale: Scale, ladder: Ladder) -> Self {
        Self { scale, ladder }
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    pub fn score_range(&self) -> (u32, u32) {
        let count = QUESTION_COUNT as u32;
        (
            SCORE_FACTOR * count * u32::from(self.scale.min),
            SCORE_FACTOR * count * u32::from(self.scale.max),
        )
    }

    pub fn validate_complete(&self, answers: &AnswerSet) -> bool {
        answers.is_complete()
    }

    pub fn compute_score(&self, answers: &AnswerSet) -> Result<u32, QuizError> {
        let ratings = answers.ratings().ok_or_else(|| QuizError::Incomplete {
            unanswered: answers.unanswered(),
        })?;
        let sum: u32 = ratings.iter().map(|&rating| u32::from(rating)).sum();
        Ok(sum * SCORE_FACTOR)
    }

    pub fn classify(&self, score: u32) -> Result<Band, QuizError> {
        let (min, max) = self.score_range();
        if !(min..=max).contains(&score) {
            return Err(QuizError::ScoreOutOfRange { score, min, max });
        }
        Ok(self.ladder.lookup(score).band)
    }

    /// Message and advice attached to `band`, or `None` when the active
    /// ladder does not use it.
    pub fn explain(&self, band: Band) -> Option<(&str, &[String])> {
        self.ladder
            .row(band)
            .map(|row| (row.message.as_str(), row.advice.as_slice()))
    }

    pub fn assess(&self, answers: &AnswerSet) -> Result<Assessment, QuizError> {
        let score = self.compute_score(answers)?;
        let band = self.classify(score)?;
        let (message, advice) = self.explain(band).ok_or(QuizError::UnknownBand { band })?;

        Ok(Assessment {
            score,
            band,
            message: message.to_string(),
            advice: advice.to_vec(),
        })
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(Scale::default(), Ladder::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bands::LadderPreset;

    fn complete(ratings: [u8; QUESTION_COUNT]) -> AnswerSet {
        AnswerSet::from_ratings(Scale::default(), ratings.map(Some)).unwrap()
    }

    #[test]
    fn score_is_four_times_the_sum() {
        let scorer = Scorer::default();
        assert_eq!(scorer.compute_score(&complete([5, 5, 2, 2, 2])), Ok(64));
        assert_eq!(scorer.compute_score(&complete([3, 3, 3, 3, 3])), Ok(60));
        assert_eq!(scorer.compute_score(&complete([0, 1, 2, 3, 4])), Ok(40));
    }

    #[test]
    fn raising_one_rating_adds_four() {
        let scorer = Scorer::default();
        for index in 0..QUESTION_COUNT {
            let mut ratings = [2; QUESTION_COUNT];
            let base = scorer.compute_score(&complete(ratings)).unwrap();
            ratings[index] += 1;
            let raised = scorer.compute_score(&complete(ratings)).unwrap();
            assert_eq!(raised, base + SCORE_FACTOR);
        }
    }

    #[test]
    fn incomplete_set_fails_explicitly() {
        let scorer = Scorer::default();
        let answers =
            AnswerSet::from_ratings(Scale::default(), [Some(5), Some(5), None, Some(5), Some(5)])
                .unwrap();
        assert!(!scorer.validate_complete(&answers));
        assert_eq!(
            scorer.compute_score(&answers),
            Err(QuizError::Incomplete {
                unanswered: vec![2]
            })
        );
        assert!(scorer.assess(&answers).is_err());
    }

    #[test]
    fn classify_covers_the_achievable_range() {
        let scorer = Scorer::default();
        assert_eq!(scorer.score_range(), (0, 100));
        for score in 0..=100 {
            assert!(scorer.classify(score).is_ok(), "score {score} unclassified");
        }
        assert_eq!(
            scorer.classify(101),
            Err(QuizError::ScoreOutOfRange {
                score: 101,
                min: 0,
                max: 100
            })
        );
    }

    #[test]
    fn one_based_scale_narrows_the_range() {
        let scorer = Scorer::new(Scale { min: 1, max: 5 }, Ladder::preset(LadderPreset::ThreeBand));
        assert_eq!(scorer.score_range(), (20, 100));
        assert!(scorer.classify(19).is_err());
        assert_eq!(scorer.classify(20), Ok(Band::Poor));
    }

    #[test]
    fn concrete_scenarios() {
        let scorer = Scorer::default();

        let all_five = scorer.assess(&complete([5; QUESTION_COUNT])).unwrap();
        assert_eq!(all_five.score, 100);
        assert_eq!(all_five.band, Band::Excellent);

        let all_zero = scorer.assess(&complete([0; QUESTION_COUNT])).unwrap();
        assert_eq!(all_zero.score, 0);
        assert_eq!(all_zero.band, Band::VeryPoor);

        let mixed = scorer.assess(&complete([5, 5, 2, 2, 2])).unwrap();
        assert_eq!(mixed.score, 64);
        assert_eq!(mixed.band, Band::Moderate);

        let flat = scorer.assess(&complete([3; QUESTION_COUNT])).unwrap();
        assert_eq!(flat.score, 60);
        assert_eq!(flat.band, Band::Moderate);
    }

    #[test]
    fn explain_is_a_stable_lookup() {
        let scorer = Scorer::default();
        let first = scorer.explain(Band::Good).unwrap();
        let second = scorer.explain(Band::Good).unwrap();
        assert_eq!(first, second);
        assert!(first.0.contains("good well-being"));
        assert!(!first.1.is_empty());

        let three_band = Scorer::new(Scale::default(), Ladder::preset(LadderPreset::ThreeBand));
        assert_eq!(three_band.explain(Band::Excellent), None);
    }

    #[test]
    fn assessment_carries_band_text() {
        let scorer = Scorer::default();
        let answers = complete([4, 4, 4, 4, 4]);
        let first = scorer.assess(&answers).unwrap();
        assert_eq!(first, scorer.assess(&answers).unwrap());

        let (message, advice) = scorer.explain(first.band).unwrap();
        assert_eq!(first.message, message);
        assert_eq!(first.advice, advice);
    }
}
