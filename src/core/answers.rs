use crate::core::error::QuizError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "I have felt cheerful and in good spirits.",
    "I have felt calm and relaxed.",
    "I have felt active and vigorous.",
    "I woke up feeling fresh and rested.",
    "My daily life has been filled with things that interest me.",
];

pub const QUESTION_COUNT: usize = 5;

/// Closed rating range shared by every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scale {
    pub min: u8,
    pub max: u8,
}

impl Default for Scale {
    fn default() -> Self {
        Self { min: 0, max: 5 }
    }
}

impl Scale {
    pub const CEILING: u8 = 20;

    pub fn contains(self, rating: u8) -> bool {
        (self.min..=self.max).contains(&rating)
    }

    pub fn ratings(self) -> impl Iterator<Item = u8> {
        self.min..=self.max
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// One rating slot per question. `None` means the question is unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSet {
    scale: Scale,
    slots: [Option<u8>; QUESTION_COUNT],
}

impl AnswerSet {
    pub fn new(scale: Scale) -> Self {
        Self {
            scale,
            slots: [None; QUESTION_COUNT],
        }
    }

    /// Builds a set from positional ratings, rejecting the first invalid one.
    pub fn from_ratings(scale: Scale, ratings: [Option<u8>; QUESTION_COUNT]) -> Result<Self, QuizError> {
        let mut answers = Self::new(scale);
        for (index, rating) in ratings.into_iter().enumerate() {
            if let Some(rating) = rating {
                answers.set_answer(index, rating)?;
            }
        }
        Ok(answers)
    }

    /// Replaces the rating of one question. Out-of-range input is rejected and
    /// leaves the set untouched.
    pub fn set_answer(&mut self, index: usize, rating: u8) -> Result<(), QuizError> {
        check_index(index)?;
        if !self.scale.contains(rating) {
            return Err(QuizError::RatingOutOfRange {
                rating,
                min: self.scale.min,
                max: self.scale.max,
            });
        }

        self.slots[index] = Some(rating);
        debug!(question = index + 1, rating, "answer set");
        Ok(())
    }

    pub fn clear_answer(&mut self, index: usize) -> Result<(), QuizError> {
        check_index(index)?;
        self.slots[index] = None;
        debug!(question = index + 1, "answer cleared");
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.slots.get(index).copied().flatten()
    }

    pub fn reset(&mut self) {
        self.slots = [None; QUESTION_COUNT];
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn unanswered(&self) -> Vec<usize> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// All ratings, or `None` while any slot is unset.
    pub fn ratings(&self) -> Option<[u8; QUESTION_COUNT]> {
        let mut ratings = [0; QUESTION_COUNT];
        for (out, slot) in ratings.iter_mut().zip(self.slots) {
            *out = slot?;
        }
        Some(ratings)
    }

    pub fn slots(&self) -> &[Option<u8>; QUESTION_COUNT] {
        &self.slots
    }
}

fn check_index(index: usize) -> Result<(), QuizError> {
    if index < QUESTION_COUNT {
        Ok(())
    } else {
        Err(QuizError::QuestionOutOfRange {
            number: index + 1,
            count: QUESTION_COUNT,
        })
    }
}
