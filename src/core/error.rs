use crate::core::bands::Band;
use thiserror::Error;

/// Errors raised by the answer store, the scorer and the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuizError {
    #[error("please answer all questions before submitting (unanswered: {})", format_ordinals(.unanswered))]
    Incomplete { unanswered: Vec<usize> },

    #[error("question {number} does not exist (expected 1..={count})")]
    QuestionOutOfRange { number: usize, count: usize },

    #[error("rating {rating} is outside the scale {min}..={max}")]
    RatingOutOfRange { rating: u8, min: u8, max: u8 },

    #[error("score {score} is outside the achievable range {min}..={max}")]
    ScoreOutOfRange { score: u32, min: u32, max: u32 },

    #[error("band {band} is not part of the active ladder")]
    UnknownBand { band: Band },

    #[error("a result is already shown; restart to answer again")]
    NotAnswering,

    #[error("no result yet; submit a complete answer set first")]
    NoResult,
}

/// Renders zero-based slot indexes as the 1-based numbers users see.
fn format_ordinals(indexes: &[usize]) -> String {
    indexes
        .iter()
        .map(|index| (index + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_lists_one_based_questions() {
        let err = QuizError::Incomplete {
            unanswered: vec![0, 4],
        };
        assert_eq!(
            err.to_string(),
            "please answer all questions before submitting (unanswered: 1, 5)"
        );
    }

    #[test]
    fn rating_out_of_range_display() {
        let err = QuizError::RatingOutOfRange {
            rating: 9,
            min: 0,
            max: 5,
        };
        assert_eq!(err.to_string(), "rating 9 is outside the scale 0..=5");
    }
}
