//! Plain-text rendering of the catalog and of a quiz attempt.

use std::io::{self, BufRead, Write};

use quiz_core::model::{Quiz, ScoreReport};
use services::{
    AnswerOutcome, FetchError, QuizSession, RefreshError, RefreshOutcome, SessionState,
};

pub fn print_catalog(out: &mut impl Write, quizzes: &[Quiz]) -> io::Result<()> {
    if quizzes.is_empty() {
        writeln!(out, "No quizzes available. Try `refresh`.")?;
        return Ok(());
    }
    for (i, quiz) in quizzes.iter().enumerate() {
        writeln!(
            out,
            "{:>2}. [{}] {} ({} questions)",
            i + 1,
            quiz.icon(),
            quiz.title(),
            quiz.question_count()
        )?;
        if !quiz.description().is_empty() {
            writeln!(out, "    {}", quiz.description())?;
        }
    }
    Ok(())
}

/// Message shown when a refresh fails.
pub fn describe_refresh_error(err: &RefreshError) -> String {
    match err {
        RefreshError::Fetch(FetchError::NotConnected) => {
            "No internet connection. Using stored quiz data.".into()
        }
        RefreshError::Fetch(FetchError::InvalidEndpoint(_)) => "Invalid URL provided.".into(),
        RefreshError::Fetch(FetchError::BadResponseStatus(_)) => {
            "Invalid response from server.".into()
        }
        RefreshError::Fetch(FetchError::EmptyBody) => "No data received from server.".into(),
        RefreshError::Fetch(FetchError::MalformedPayload(_)) => {
            "Could not parse the data from server.".into()
        }
        other => format!("An error occurred: {other}"),
    }
}

/// Report a refresh attempt. Returns whether it succeeded.
pub fn print_refresh_result(
    out: &mut impl Write,
    result: &Result<RefreshOutcome, RefreshError>,
) -> io::Result<bool> {
    match result {
        Ok(outcome) => {
            writeln!(
                out,
                "Quizzes updated successfully ({} quizzes).",
                outcome.quiz_count
            )?;
            if !outcome.snapshot_saved {
                writeln!(out, "Warning: the local copy could not be saved.")?;
            }
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "{}", describe_refresh_error(err))?;
            Ok(false)
        }
    }
}

/// Run a session to completion against line-based input.
///
/// Returns `None` if input ends (or the user types `q`) before the last question.
pub fn play(
    session: &mut QuizSession,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<Option<ScoreReport>> {
    writeln!(out, "== {} ==", session.quiz().title())?;

    while let Some(question) = session.current_question().cloned() {
        let progress = session.progress();
        writeln!(out)?;
        writeln!(
            out,
            "Question {} of {}: {}",
            progress.position.unwrap_or(progress.total),
            progress.total,
            question.text()
        )?;
        for (i, option) in question.options().iter().enumerate() {
            let marker = if session.selected_option() == Some(i) { '*' } else { ' ' };
            writeln!(out, " {marker}{}) {option}", i + 1)?;
        }

        let outcome = loop {
            write!(out, "Your answer (1-{}, q to quit): ", question.option_count())?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            // Enter keeps a pre-selected answer.
            if line.is_empty() && matches!(session.state(), SessionState::Selected { .. }) {
                if let Ok(outcome) = session.submit() {
                    break outcome;
                }
                continue;
            }
            let Some(choice) = line.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
                writeln!(out, "Please enter a number.")?;
                continue;
            };
            match session.select(choice).and_then(|()| session.submit()) {
                Ok(outcome) => break outcome,
                Err(err) => writeln!(out, "{err}")?,
            }
        };

        print_outcome(out, &outcome)?;
        if session.advance().is_err() {
            break;
        }
    }

    match session.report() {
        Ok(report) => {
            print_report(out, session.quiz().title(), &report)?;
            Ok(Some(report))
        }
        Err(_) => Ok(None),
    }
}

fn print_outcome(out: &mut impl Write, outcome: &AnswerOutcome) -> io::Result<()> {
    if outcome.is_correct() {
        writeln!(out, "Correct!")?;
    } else {
        writeln!(out, "Incorrect")?;
    }
    writeln!(out, "The correct answer is: {}", outcome.correct_option())?;
    if outcome.is_last() {
        writeln!(out, "(that was the last question)")?;
    }
    Ok(())
}

fn print_report(out: &mut impl Write, title: &str, report: &ScoreReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", report.tier().headline())?;
    writeln!(out, "{} ({}%)", report.score_line(), report.percentage())?;
    writeln!(out, "{}", report.message(title))?;
    Ok(())
}
