use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuizError};
use crate::model::quiz::Quiz;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FeedError {
    #[error("quiz {quiz:?}, question {question}: {source}")]
    InvalidQuestion {
        quiz: String,
        question: usize,
        #[source]
        source: QuizError,
    },
}

/// Wire shape of one quiz in the remote feed and in local snapshots.
///
/// `{"title": .., "desc": .., "questions": [..]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub title: String,
    pub desc: String,
    pub questions: Vec<QuestionRecord>,
}

/// Wire shape of one question; the correct answer is given by its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub text: String,
    pub answer: String,
    pub answers: Vec<String>,
}

impl QuestionRecord {
    /// Position of `answer` within `answers`, or 0 when the text is not listed.
    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.answers
            .iter()
            .position(|option| *option == self.answer)
            .unwrap_or(0)
    }

    /// Convert the record into a domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if the record lists fewer than two options or repeats one.
    pub fn into_question(self) -> Result<Question, QuizError> {
        let correct = self.correct_option_index();
        Question::new(self.text, self.answers, correct)
    }

    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            text: question.text().to_owned(),
            answer: question.correct_option().to_owned(),
            answers: question.options().to_vec(),
        }
    }
}

impl QuizRecord {
    /// Convert the record into a domain `Quiz`, deriving its icon from the title.
    ///
    /// # Errors
    ///
    /// Returns `FeedError::InvalidQuestion` naming the first question that fails
    /// validation.
    pub fn into_quiz(self) -> Result<Quiz, FeedError> {
        let title = self.title;
        let mut questions = Vec::with_capacity(self.questions.len());
        for (index, record) in self.questions.into_iter().enumerate() {
            let question = record
                .into_question()
                .map_err(|source| FeedError::InvalidQuestion {
                    quiz: title.clone(),
                    question: index,
                    source,
                })?;
            questions.push(question);
        }
        Ok(Quiz::with_derived_icon(title, self.desc, questions))
    }

    #[must_use]
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title().to_owned(),
            desc: quiz.description().to_owned(),
            questions: quiz
                .questions()
                .iter()
                .map(QuestionRecord::from_question)
                .collect(),
        }
    }
}

/// Map a whole feed into quizzes; fails on the first invalid record.
///
/// # Errors
///
/// Returns `FeedError` for the first record that fails validation.
pub fn into_quizzes(records: Vec<QuizRecord>) -> Result<Vec<Quiz>, FeedError> {
    records.into_iter().map(QuizRecord::into_quiz).collect()
}
