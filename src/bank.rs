use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::sign::ZodiacSign;

static QUESTION_DIR: Dir = include_dir!("src/questions");

#[derive(Debug, Error)]
pub enum BankError {
    #[error("question bank has no questions")]
    Empty,
    #[error("question {0:?} does not offer every zodiac sign exactly once")]
    Unbalanced(String),
    #[error("malformed question bank: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One selectable answer, weighted toward a single sign.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Choice {
    pub text: String,
    pub sign: ZodiacSign,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub text: String,
    pub choices: Vec<Choice>,
}

/// A fixed set of questions, each offering exactly one choice per sign.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct QuestionBank {
    pub name: String,
    pub questions: Vec<Question>,
}

impl QuestionBank {
    /// The bundled zodiac bank. Broken bundled data is a build defect, so
    /// this panics rather than returning an error.
    pub fn builtin() -> Self {
        let file = QUESTION_DIR
            .get_file("zodiac.json")
            .expect("Question bank file not found");

        let file_as_str = file
            .contents_utf8()
            .expect("Unable to interpret file as a string");

        Self::from_json(file_as_str).expect("Unable to load bundled question bank")
    }

    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let bank: QuestionBank = serde_json::from_str(raw)?;
        bank.validate()?;
        Ok(bank)
    }

    /// Every question must offer each sign exactly once; an unbalanced
    /// question would skew the tally toward whatever it over-represents.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.questions.is_empty() {
            return Err(BankError::Empty);
        }

        for question in &self.questions {
            let mut seen = HashSet::new();
            let balanced = question.choices.len() == ZodiacSign::ALL.len()
                && question.choices.iter().all(|c| seen.insert(c.sign));

            if !balanced {
                return Err(BankError::Unbalanced(question.text.clone()));
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
