mod feed;
mod icon;
mod quiz;
mod report;
mod settings;

pub use feed::{into_quizzes, FeedError, QuestionRecord, QuizRecord};
pub use icon::IconTag;
pub use quiz::{Question, Quiz, QuizError};
pub use report::{ScoreReport, ScoreReportError, Tier};
pub use settings::{DEFAULT_ENDPOINT, SettingsError, SourceSettings, SourceSettingsDraft};
