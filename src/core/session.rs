use crate::core::answers::AnswerSet;
use crate::core::error::QuizError;
use crate::core::score::{Assessment, Scorer};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    ResultShown,
}

/// One user's pass through the questionnaire. Owns the answers; scoring is
/// delegated to the borrowed [`Scorer`].
#[derive(Debug)]
pub struct Session<'a> {
    scorer: &'a Scorer,
    answers: AnswerSet,
    result: Option<Assessment>,
}

impl<'a> Session<'a> {
    pub fn new(scorer: &'a Scorer) -> Self {
        Self {
            scorer,
            answers: AnswerSet::new(scorer.scale()),
            result: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.result.is_some() {
            Phase::ResultShown
        } else {
            Phase::Answering
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn scorer(&self) -> &'a Scorer {
        self.scorer
    }

    pub fn set_answer(&mut self, index: usize, rating: u8) -> Result<(), QuizError> {
        self.ensure_answering()?;
        self.answers.set_answer(index, rating)
    }

    pub fn clear_answer(&mut self, index: usize) -> Result<(), QuizError> {
        self.ensure_answering()?;
        self.answers.clear_answer(index)
    }

    /// Moves to `ResultShown` when every question is answered. An incomplete
    /// set leaves the session in `Answering` and returns the rejection.
    pub fn submit(&mut self) -> Result<&Assessment, QuizError> {
        if !self.scorer.validate_complete(&self.answers) {
            let unanswered = self.answers.unanswered();
            debug!(?unanswered, "submission rejected");
            return Err(QuizError::Incomplete { unanswered });
        }

        let assessment = self.scorer.assess(&self.answers)?;
        info!(score = assessment.score, band = %assessment.band, "result shown");
        Ok(&*self.result.insert(assessment))
    }

    pub fn restart(&mut self) {
        self.answers.reset();
        self.result = None;
        debug!("session restarted");
    }

    pub fn result(&self) -> Result<&Assessment, QuizError> {
        self.result.as_ref().ok_or(QuizError::NoResult)
    }

    fn ensure_answering(&self) -> Result<(), QuizError> {
        match self.phase() {
            Phase::Answering => Ok(()),
            Phase::ResultShown => Err(QuizError::NotAnswering),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::answers::QUESTION_COUNT;
    use crate::core::bands::Band;

    fn answer_all(session: &mut Session<'_>, rating: u8) {
        for index in 0..QUESTION_COUNT {
            session.set_answer(index, rating).unwrap();
        }
    }

    #[test]
    fn starts_answering_without_result() {
        let scorer = Scorer::default();
        let session = Session::new(&scorer);
        assert_eq!(session.phase(), Phase::Answering);
        assert_eq!(session.result(), Err(QuizError::NoResult));
    }

    #[test]
    fn incomplete_submit_is_rejected_and_stays_answering() {
        let scorer = Scorer::default();
        let mut session = Session::new(&scorer);
        for index in 0..QUESTION_COUNT - 1 {
            session.set_answer(index, 5).unwrap();
        }

        let err = session.submit().unwrap_err();
        assert_eq!(
            err,
            QuizError::Incomplete {
                unanswered: vec![QUESTION_COUNT - 1]
            }
        );
        assert_eq!(session.phase(), Phase::Answering);
        assert!(session.result().is_err());
    }

    #[test]
    fn complete_submit_shows_result() {
        let scorer = Scorer::default();
        let mut session = Session::new(&scorer);
        answer_all(&mut session, 5);

        let result = session.submit().unwrap().clone();
        assert_eq!(result.score, 100);
        assert_eq!(result.band, Band::Excellent);
        assert_eq!(session.phase(), Phase::ResultShown);
        assert_eq!(session.result(), Ok(&result));
    }

    #[test]
    fn answers_are_frozen_while_result_is_shown() {
        let scorer = Scorer::default();
        let mut session = Session::new(&scorer);
        answer_all(&mut session, 3);
        session.submit().unwrap();

        assert_eq!(session.set_answer(0, 1), Err(QuizError::NotAnswering));
        assert_eq!(session.clear_answer(0), Err(QuizError::NotAnswering));
        assert_eq!(session.answers().get(0), Some(3));
    }

    #[test]
    fn restart_clears_answers_and_cycles() {
        let scorer = Scorer::default();
        let mut session = Session::new(&scorer);
        answer_all(&mut session, 2);
        session.submit().unwrap();

        session.restart();
        assert_eq!(session.phase(), Phase::Answering);
        assert!(!session.answers().is_complete());
        assert!(session.submit().is_err());

        answer_all(&mut session, 4);
        assert_eq!(session.submit().map(|result| result.score), Ok(80));
        assert_eq!(session.phase(), Phase::ResultShown);
    }
}
