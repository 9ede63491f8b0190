use std::fmt;

use thiserror::Error;

use crate::model::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreReportError {
    #[error("a score report needs at least one question")]
    NoQuestions,

    #[error("correct count ({correct}) exceeds total ({total})")]
    CountMismatch { correct: u32, total: u32 },

    #[error("{answers} answers recorded for {questions} questions")]
    AnswerCountMismatch { answers: usize, questions: usize },

    #[error("too many questions for a single report: {len}")]
    TooManyQuestions { len: usize },
}

/// Coarse performance bucket derived from the percentage of correct answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Perfect,
    Great,
    Good,
    NeedsWork,
}

impl Tier {
    /// Bucket a score. `total` must be non-zero.
    ///
    /// Thresholds use integer cross-multiplication so 80% and 60% are exact.
    #[must_use]
    pub fn from_counts(correct: u32, total: u32) -> Self {
        let scaled = u64::from(correct) * 100;
        let total = u64::from(total);
        if correct > 0 && scaled == total * 100 {
            Tier::Perfect
        } else if scaled >= total * 80 {
            Tier::Great
        } else if scaled >= total * 60 {
            Tier::Good
        } else {
            Tier::NeedsWork
        }
    }

    #[must_use]
    pub fn headline(self) -> &'static str {
        match self {
            Tier::Perfect => "Perfect!",
            Tier::Great => "Great Job!",
            Tier::Good => "Good Effort!",
            Tier::NeedsWork => "Try Again!",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.headline())
    }
}

/// Final score of a completed quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    correct_count: u32,
    total_count: u32,
    tier: Tier,
}

impl ScoreReport {
    /// Build a report from raw counts.
    ///
    /// # Errors
    ///
    /// Returns `ScoreReportError::NoQuestions` if `total_count` is zero.
    /// Returns `ScoreReportError::CountMismatch` if `correct_count > total_count`.
    pub fn from_counts(correct_count: u32, total_count: u32) -> Result<Self, ScoreReportError> {
        if total_count == 0 {
            return Err(ScoreReportError::NoQuestions);
        }
        if correct_count > total_count {
            return Err(ScoreReportError::CountMismatch {
                correct: correct_count,
                total: total_count,
            });
        }

        Ok(Self {
            correct_count,
            total_count,
            tier: Tier::from_counts(correct_count, total_count),
        })
    }

    /// Score recorded answers against their questions.
    ///
    /// Unanswered slots (`None`) always count as wrong.
    ///
    /// # Errors
    ///
    /// Returns `ScoreReportError::AnswerCountMismatch` if the slices differ in length,
    /// `ScoreReportError::TooManyQuestions` if the count cannot fit in `u32`, and
    /// `ScoreReportError::NoQuestions` for an empty quiz.
    pub fn from_answers(
        questions: &[Question],
        answers: &[Option<usize>],
    ) -> Result<Self, ScoreReportError> {
        if questions.len() != answers.len() {
            return Err(ScoreReportError::AnswerCountMismatch {
                answers: answers.len(),
                questions: questions.len(),
            });
        }

        let mut correct = 0_u32;
        for (question, answer) in questions.iter().zip(answers) {
            if answer.is_some_and(|chosen| question.is_correct(chosen)) {
                correct = correct.saturating_add(1);
            }
        }

        let total = u32::try_from(questions.len()).map_err(|_| {
            ScoreReportError::TooManyQuestions {
                len: questions.len(),
            }
        })?;

        Self::from_counts(correct, total)
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Whole-number percentage, rounded down.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        let pct = u64::from(self.correct_count) * 100 / u64::from(self.total_count);
        // Never above 100 since correct <= total.
        u32::try_from(pct).unwrap_or(100)
    }

    /// "`n` out of `m` correct" line for the finish screen.
    #[must_use]
    pub fn score_line(&self) -> String {
        format!("{} out of {} correct", self.correct_count, self.total_count)
    }

    /// Encouragement text for the finish screen.
    #[must_use]
    pub fn message(&self, quiz_title: &str) -> String {
        match self.tier {
            Tier::Perfect => format!(
                "Congratulations! You got all questions correct in the {quiz_title} quiz."
            ),
            Tier::Great => format!("You did very well in the {quiz_title} quiz. Keep it up!"),
            Tier::Good => format!(
                "You did well in the {quiz_title} quiz, but there's room for improvement."
            ),
            Tier::NeedsWork => {
                format!("You might want to review the {quiz_title} material and try again.")
            }
        }
    }
}
