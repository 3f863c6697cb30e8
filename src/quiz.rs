use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::bank::{Choice, Question, QuestionBank};
use crate::sign::ZodiacSign;

#[derive(Debug, Error, PartialEq)]
pub enum QuizError {
    #[error("{0} is not offered by the current question")]
    InvalidAnswer(ZodiacSign),
    #[error("the session has already been completed")]
    SessionComplete,
}

/// What `submit_answer` moved the session to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Progress {
    Next,
    Complete(ZodiacSign),
}

/// Owned snapshot of the question being shown, with its choices in display
/// order. Choice order is drawn fresh on every `current_question` call.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedQuestion {
    pub number: usize,
    pub total: usize,
    pub text: String,
    pub choices: Vec<Choice>,
}

/// A single play-through of the question bank.
///
/// Question order is shuffled once when the session starts and stays fixed
/// until `restart`. Each instance owns its RNG, so independent sessions never
/// share randomness state.
#[derive(Debug)]
pub struct Quiz {
    questions: Vec<Question>,
    current: usize,
    answers: Vec<ZodiacSign>,
    result: Option<ZodiacSign>,
    rng: StdRng,
}

impl Quiz {
    pub fn new(bank: QuestionBank) -> Self {
        Self::with_rng(bank, StdRng::from_entropy())
    }

    /// Starts a session with a caller-provided RNG, for reproducible
    /// question order and tie-breaks.
    pub fn with_rng(bank: QuestionBank, rng: StdRng) -> Self {
        let mut quiz = Self {
            questions: bank.questions,
            current: 0,
            answers: Vec::new(),
            result: None,
            rng,
        };
        quiz.questions.shuffle(&mut quiz.rng);
        quiz
    }

    /// The question to show right now, its choices freshly shuffled.
    ///
    /// Does not advance the session; callers that re-render an unanswered
    /// question should reuse the returned snapshot if they want a stable
    /// on-screen order.
    pub fn current_question(&mut self) -> Result<DisplayedQuestion, QuizError> {
        if self.result.is_some() || self.current >= self.questions.len() {
            return Err(QuizError::SessionComplete);
        }

        let question = &self.questions[self.current];
        let mut choices = question.choices.clone();
        choices.shuffle(&mut self.rng);

        Ok(DisplayedQuestion {
            number: self.current + 1,
            total: self.questions.len(),
            text: question.text.clone(),
            choices,
        })
    }

    /// Records an answer for the current question.
    ///
    /// Answering the final question runs the tally and fixes the result; any
    /// further submission fails with `SessionComplete`.
    pub fn submit_answer(&mut self, sign: ZodiacSign) -> Result<Progress, QuizError> {
        if self.result.is_some() || self.current >= self.questions.len() {
            return Err(QuizError::SessionComplete);
        }

        let offered = self.questions[self.current]
            .choices
            .iter()
            .any(|c| c.sign == sign);
        if !offered {
            return Err(QuizError::InvalidAnswer(sign));
        }

        self.answers.push(sign);

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            Ok(Progress::Next)
        } else {
            let winner = self.pick_winner();
            self.result = Some(winner);
            Ok(Progress::Complete(winner))
        }
    }

    /// Throws away all progress and starts over on a reshuffled order.
    pub fn restart(&mut self) {
        self.questions.shuffle(&mut self.rng);
        self.current = 0;
        self.answers.clear();
        self.result = None;
    }

    pub fn result(&self) -> Option<ZodiacSign> {
        self.result
    }

    pub fn has_finished(&self) -> bool {
        self.result.is_some()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn answers(&self) -> &[ZodiacSign] {
        &self.answers
    }

    /// Per-sign answer counts in declaration order, zero-filled for signs
    /// that never came up.
    pub fn tally(&self) -> Vec<(ZodiacSign, usize)> {
        ZodiacSign::ALL
            .iter()
            .map(|&sign| (sign, self.answers.iter().filter(|&&a| a == sign).count()))
            .collect()
    }

    fn pick_winner(&mut self) -> ZodiacSign {
        let counts = self.tally();
        let max = counts.iter().map(|&(_, n)| n).max().unwrap_or(0);

        let tied: Vec<ZodiacSign> = counts
            .into_iter()
            .filter(|&(_, n)| n == max)
            .map(|(sign, _)| sign)
            .collect();

        // Fresh uniform draw per completed session; a one-element list is
        // the trivial no-tie case.
        tied.choose(&mut self.rng)
            .copied()
            .unwrap_or(ZodiacSign::Aries)
    }
}
