use std::fmt;

use quiz_core::model::{Question, Quiz, ScoreReport};

use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

/// Where a session stands in the question → answer → next loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Question `index` is shown with nothing chosen.
    AwaitingSelection { index: usize },
    /// An option is chosen for question `index` but not yet submitted.
    Selected { index: usize, option: usize },
    /// The choice for question `index` is recorded; the next step is `advance`.
    Submitted { index: usize, option: usize },
    /// Every question has been passed.
    Completed,
}

impl SessionState {
    fn name(self) -> &'static str {
        match self {
            SessionState::AwaitingSelection { .. } => "awaiting a selection",
            SessionState::Selected { .. } => "an option is selected",
            SessionState::Submitted { .. } => "an answer is submitted",
            SessionState::Completed => "completed",
        }
    }

    #[must_use]
    pub fn question_index(self) -> Option<usize> {
        match self {
            SessionState::AwaitingSelection { index }
            | SessionState::Selected { index, .. }
            | SessionState::Submitted { index, .. } => Some(index),
            SessionState::Completed => None,
        }
    }
}

//
// ─── ANSWER OUTCOME ────────────────────────────────────────────────────────────
//

/// Result of submitting one answer, for the answer screen.
///
/// Only produced by `QuizSession::submit`, so the chosen index always names one
/// of the question's options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    question: Question,
    chosen_index: usize,
    is_correct: bool,
    is_last: bool,
}

impl AnswerOutcome {
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn chosen_index(&self) -> usize {
        self.chosen_index
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    /// True when `advance` will complete the session.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.is_last
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.question.correct_option()
    }

    #[must_use]
    pub fn chosen_option(&self) -> &str {
        self.question
            .options()
            .get(self.chosen_index)
            .map_or("", String::as_str)
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One attempt at a single quiz.
///
/// Owns a snapshot of the quiz and one answer slot per question. Transitions are
/// requested serially by the presenter; a rejected call never changes state.
pub struct QuizSession {
    quiz: Quiz,
    state: SessionState,
    answers: Vec<Option<usize>>,
}

impl QuizSession {
    /// Start an attempt at `quiz`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuiz` if the quiz has no questions.
    pub fn new(quiz: Quiz) -> Result<Self, SessionError> {
        if quiz.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }

        let answers = vec![None; quiz.question_count()];
        Ok(Self {
            quiz,
            state: SessionState::AwaitingSelection { index: 0 },
            answers,
        })
    }

    #[must_use]
    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Recorded answers, one slot per question.
    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.state.question_index()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_index().and_then(|index| self.quiz.question(index))
    }

    /// Option chosen for the current question, submitted or not.
    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        match self.state {
            SessionState::Selected { option, .. } | SessionState::Submitted { option, .. } => {
                Some(option)
            }
            SessionState::AwaitingSelection { .. } | SessionState::Completed => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Completed
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.quiz.question_count();
        let answered = self.answers.iter().filter(|slot| slot.is_some()).count();
        let remaining = match self.state {
            SessionState::AwaitingSelection { index } | SessionState::Selected { index, .. } => {
                total - index
            }
            SessionState::Submitted { index, .. } => total - index - 1,
            SessionState::Completed => 0,
        };
        SessionProgress {
            position: self.current_index().map(|index| index + 1),
            total,
            answered,
            remaining,
            is_complete: self.is_complete(),
        }
    }

    /// Choose an option for the current question, replacing any earlier choice.
    ///
    /// Selecting after `submit` reopens the question; it must be submitted again
    /// before `advance`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` once the session is complete and
    /// `SessionError::IndexOutOfRange` if `option` is not one of the question's options.
    pub fn select(&mut self, option: usize) -> Result<(), SessionError> {
        let Some(index) = self.state.question_index() else {
            return Err(self.invalid("select an option"));
        };
        let len = self.quiz.questions()[index].option_count();
        if option >= len {
            return Err(SessionError::IndexOutOfRange { index: option, len });
        }

        self.state = SessionState::Selected { index, option };
        Ok(())
    }

    /// Record the selected option for the current question.
    ///
    /// Does not move to the next question; call `advance` for that.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless an option is selected.
    pub fn submit(&mut self) -> Result<AnswerOutcome, SessionError> {
        let SessionState::Selected { index, option } = self.state else {
            return Err(self.invalid("submit"));
        };

        let question = self.quiz.questions()[index].clone();
        self.answers[index] = Some(option);
        self.state = SessionState::Submitted { index, option };

        Ok(AnswerOutcome {
            is_correct: question.is_correct(option),
            question,
            chosen_index: option,
            is_last: index + 1 == self.quiz.question_count(),
        })
    }

    /// Move past a submitted question.
    ///
    /// The next question starts with its previously recorded answer pre-selected,
    /// if it has one. After the last question the session is complete.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` unless the current question has
    /// just been submitted.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        let SessionState::Submitted { index, .. } = self.state else {
            return Err(self.invalid("advance"));
        };

        let next = index + 1;
        self.state = if next == self.quiz.question_count() {
            tracing::debug!("quiz {:?} completed", self.quiz.title());
            SessionState::Completed
        } else {
            match self.answers[next] {
                Some(option) => SessionState::Selected {
                    index: next,
                    option,
                },
                None => SessionState::AwaitingSelection { index: next },
            }
        };
        Ok(self.state)
    }

    /// Score the finished attempt. Pure; may be called repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` before the session is complete.
    pub fn report(&self) -> Result<ScoreReport, SessionError> {
        if !self.is_complete() {
            return Err(self.invalid("report"));
        }
        Ok(ScoreReport::from_answers(self.quiz.questions(), &self.answers)?)
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("quiz", &self.quiz.title())
            .field("questions_len", &self.quiz.question_count())
            .field("state", &self.state)
            .field("answers", &self.answers)
            .finish()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
