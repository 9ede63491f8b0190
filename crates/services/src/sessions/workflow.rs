use std::sync::Arc;

use crate::catalog::QuizCatalog;
use crate::error::SessionError;
use super::service::QuizSession;

/// Starts quiz attempts from whatever the catalog holds right now.
#[derive(Clone, Debug)]
pub struct SessionLauncher {
    catalog: Arc<QuizCatalog>,
}

impl SessionLauncher {
    #[must_use]
    pub fn new(catalog: Arc<QuizCatalog>) -> Self {
        Self { catalog }
    }

    /// Start a session on the quiz at `index` in the current catalog.
    ///
    /// The session owns a clone of the quiz, so later refreshes do not affect it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuizNotFound` for an unknown position and
    /// `SessionError::EmptyQuiz` if that quiz has no questions.
    pub fn start(&self, index: usize) -> Result<QuizSession, SessionError> {
        let quiz = self
            .catalog
            .get(index)
            .ok_or(SessionError::QuizNotFound { index })?;
        tracing::debug!("starting session for quiz {:?}", quiz.title());
        QuizSession::new(quiz)
    }
}
