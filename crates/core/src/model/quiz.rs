use thiserror::Error;

use crate::model::icon::IconTag;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question must offer at least 2 options, got {count}")]
    TooFewOptions { count: usize },

    #[error("correct option {index} is out of range for {count} options")]
    CorrectOptionOutOfRange { index: usize, count: usize },

    #[error("option {text:?} appears more than once")]
    DuplicateOption { text: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice prompt with exactly one correct option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option_index: usize,
}

impl Question {
    /// Minimum number of options a question must offer.
    pub const MIN_OPTIONS: usize = 2;

    /// Creates a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::TooFewOptions` if fewer than two options are given.
    /// Returns `QuizError::CorrectOptionOutOfRange` if the correct index does not
    /// resolve to one of the options.
    /// Returns `QuizError::DuplicateOption` if two options share the same text;
    /// the correct answer is stored by text, so it must name exactly one option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option_index: usize,
    ) -> Result<Self, QuizError> {
        if options.len() < Self::MIN_OPTIONS {
            return Err(QuizError::TooFewOptions {
                count: options.len(),
            });
        }
        if correct_option_index >= options.len() {
            return Err(QuizError::CorrectOptionOutOfRange {
                index: correct_option_index,
                count: options.len(),
            });
        }
        if let Some(dup) = options
            .iter()
            .enumerate()
            .find_map(|(i, text)| options[..i].contains(text).then_some(text))
        {
            return Err(QuizError::DuplicateOption { text: dup.clone() });
        }

        Ok(Self {
            text: text.into(),
            options,
            correct_option_index,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    /// Text of the correct option.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        // Index validated at construction.
        &self.options[self.correct_option_index]
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option_index
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A titled set of questions sharing a theme.
///
/// Quizzes are immutable once built; sessions hold their own clone so a catalog
/// refresh never changes an attempt in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    title: String,
    description: String,
    icon: IconTag,
    questions: Vec<Question>,
}

impl Quiz {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        icon: IconTag,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            icon,
            questions,
        }
    }

    /// Builds a quiz whose icon is derived from its title.
    #[must_use]
    pub fn with_derived_icon(
        title: impl Into<String>,
        description: impl Into<String>,
        questions: Vec<Question>,
    ) -> Self {
        let title = title.into();
        let icon = IconTag::for_title(&title);
        Self::new(title, description, icon, questions)
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> IconTag {
        self.icon
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
