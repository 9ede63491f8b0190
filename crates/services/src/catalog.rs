use std::sync::{Arc, PoisonError, RwLock};

use quiz_core::defaults::default_quizzes;
use quiz_core::model::{FeedError, Quiz};

/// In-memory set of quizzes available to start.
///
/// Writers swap the whole list behind an `Arc`; readers clone the current `Arc`
/// and keep reading it even if a refresh lands meanwhile.
#[derive(Debug, Default)]
pub struct QuizCatalog {
    quizzes: RwLock<Arc<Vec<Quiz>>>,
}

impl QuizCatalog {
    #[must_use]
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        Self {
            quizzes: RwLock::new(Arc::new(quizzes)),
        }
    }

    /// Catalog seeded with the compiled-in quizzes.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` if the built-in content fails validation.
    pub fn with_defaults() -> Result<Self, FeedError> {
        Ok(Self::new(default_quizzes()?))
    }

    /// Current quizzes, in insertion order.
    #[must_use]
    pub fn list(&self) -> Arc<Vec<Quiz>> {
        // The guarded value is a single Arc; a poisoned lock still holds a whole list.
        let guard = self.quizzes.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace every quiz at once.
    pub fn replace_all(&self, quizzes: Vec<Quiz>) {
        let next = Arc::new(quizzes);
        let mut guard = self.quizzes.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Clone of the quiz at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Quiz> {
        self.list().get(index).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}
