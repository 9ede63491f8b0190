//! Compiled-in catalog used when no snapshot is available.

use crate::model::{into_quizzes, FeedError, QuestionRecord, Quiz, QuizRecord};

fn question(text: &str, answer: &str, answers: [&str; 4]) -> QuestionRecord {
    QuestionRecord {
        text: text.to_owned(),
        answer: answer.to_owned(),
        answers: answers.iter().map(|s| (*s).to_owned()).collect(),
    }
}

/// Default quizzes in feed form.
#[must_use]
pub fn default_records() -> Vec<QuizRecord> {
    vec![
        QuizRecord {
            title: "Mathematics".into(),
            desc: "Test your math knowledge with these questions".into(),
            questions: vec![
                question("Easy: What is 5 + 3?", "8", ["6", "7", "8", "9"]),
                question("Medium: What is 12 ÷ 4 × 2?", "6", ["6", "8", "4", "3"]),
                question(
                    "Hard: What is the value of x in the equation 2x + 3 = 11?",
                    "4",
                    ["3", "4", "5", "6"],
                ),
            ],
        },
        QuizRecord {
            title: "Marvel Super Heroes".into(),
            desc: "How well do you know Marvel superheroes?".into(),
            questions: vec![
                question(
                    "Easy: Which superhero wears a red and blue spider suit?",
                    "Spider-man",
                    ["Iron Man", "Hulk", "Spider-man", "Captain America"],
                ),
                question(
                    "Medium: What is Black Panther's home country?",
                    "Wakanda",
                    ["Zamunda", "Genosha", "Sokovia", "Wakanda"],
                ),
                question(
                    "Hard: Which Infinity Stone did Vision have in his forehead?",
                    "Mind",
                    ["Power", "Mind", "Reality", "Time"],
                ),
            ],
        },
        QuizRecord {
            title: "Science".into(),
            desc: "Challenge yourself with science questions".into(),
            questions: vec![
                question(
                    "Easy: What is the chemical symbol for water?",
                    "H2O",
                    ["H2O", "CO2", "NaCl", "O2"],
                ),
                question(
                    "Medium: What is the closest planet to the Sun?",
                    "Mercury",
                    ["Earth", "Venus", "Mercury", "Mars"],
                ),
                question(
                    "Hard: What particle has a negative electric charge?",
                    "Electron",
                    ["Proton", "Neutron", "Electron", "Photon"],
                ),
            ],
        },
    ]
}

/// Default quizzes as domain values.
///
/// # Errors
///
/// Returns `FeedError` if a built-in record is invalid (covered by tests).
pub fn default_quizzes() -> Result<Vec<Quiz>, FeedError> {
    into_quizzes(default_records())
}
