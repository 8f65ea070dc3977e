//! Line-based presentation layer for the quiz and the kana chart.

use std::io::{self, BufRead, Write};

use quiz_core::model::Category;
use quiz_core::quiz::{Intent, Outcome, QuizError, QuizSession};
use quiz_core::syllabary::{Syllabary, romaji};
use services::QuizService;

const HEART: &str = "♥";
const MAX_HEARTS: u32 = 10;

/// What the player did with the quiz screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Finished(Outcome),
    Quit,
}

/// Drive a session until it ends or the player quits.
///
/// Input per question: the number of an answer (or `q`), then Enter to move on.
///
/// # Errors
///
/// Returns `io::Error` if reading input or writing output fails.
pub fn run_quiz<R: BufRead, W: Write>(
    service: &QuizService,
    session: &mut QuizSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<Exit> {
    while let Some(question) = session.current_question().cloned() {
        let progress = session.progress();
        writeln!(out)?;
        writeln!(
            out,
            "Pregunta {}/{}   {}",
            session.current_index() + 1,
            progress.total,
            lives_label(progress.lives_remaining)
        )?;
        writeln!(out, "{}", question.question())?;
        for (n, answer) in question.answers().iter().enumerate() {
            writeln!(out, "  {}) {answer}", n + 1)?;
        }

        // Select until an answer is chosen, then check it.
        loop {
            write!(out, "Respuesta (1-{}, q para salir): ", question.answers().len())?;
            out.flush()?;
            let Some(line) = read_line(input)? else {
                return Ok(Exit::Quit);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(Exit::Quit);
            }
            let Some(answer) = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| question.answers().get(i))
            else {
                writeln!(out, "Elige un número de la lista.")?;
                continue;
            };
            match service.dispatch(session, Intent::Select(answer.clone())) {
                Ok(_) => break,
                Err(err) => report(out, &err)?,
            }
        }

        if let Err(err) = service.dispatch(session, Intent::Submit) {
            report(out, &err)?;
            continue;
        }
        if session.last_answer_correct() == Some(true) {
            writeln!(out, "✔ La respuesta es correcta")?;
        } else {
            writeln!(out, "✘ La respuesta es incorrecta")?;
            writeln!(out, "La respuesta correcta es: {}", question.correct_answer())?;
        }

        write!(out, "[Enter] Siguiente ")?;
        out.flush()?;
        if read_line(input)?.is_none() {
            return Ok(Exit::Quit);
        }
        if let Err(err) = service.dispatch(session, Intent::Advance) {
            report(out, &err)?;
        }
    }

    print_summary(session, out)?;
    Ok(Exit::Finished(session.outcome()))
}

/// One heart per life, or a count once hearts stop being readable.
fn lives_label(lives: u32) -> String {
    if lives > MAX_HEARTS {
        format!("{HEART} x{lives}")
    } else {
        HEART.repeat(lives as usize)
    }
}

fn report<W: Write>(out: &mut W, err: &QuizError) -> io::Result<()> {
    tracing::debug!(error = %err, "intent rejected");
    writeln!(out, "({err})")
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Completion or loss screen.
///
/// # Errors
///
/// Returns `io::Error` if writing fails.
pub fn print_summary<W: Write>(session: &QuizSession, out: &mut W) -> io::Result<()> {
    let summary = session.summary();
    writeln!(out)?;
    match summary.outcome {
        Outcome::Completed => writeln!(out, "¡Has completado la lección!")?,
        Outcome::Lost => writeln!(out, "Te quedaste sin vidas.")?,
        Outcome::Active => return Ok(()),
    }
    writeln!(
        out,
        "Has contestado {} de {} preguntas correctamente.",
        summary.correct, summary.total
    )
}

/// # Errors
///
/// Returns `io::Error` if writing fails.
pub fn print_categories<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Categorías")?;
    for category in Category::catalog() {
        writeln!(out, "  {:>2}  {}", category.id().value(), category.name())?;
    }
    Ok(())
}

/// Print the chart for one syllabary, characters with their romaji.
///
/// # Errors
///
/// Returns `io::Error` if writing fails.
pub fn print_chart<W: Write>(syllabary: Syllabary, out: &mut W) -> io::Result<()> {
    writeln!(out, "{syllabary}")?;
    for row in syllabary.rows() {
        let cells: Vec<String> = row
            .iter()
            .map(|kana| format!("{} {:<4}", kana.character, kana.romaji))
            .collect();
        writeln!(out, "  {}", cells.join("  ").trim_end())?;
    }
    Ok(())
}

/// Readings for each kana in `text`; unknown characters show as `?`.
#[must_use]
pub fn reading_of(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| romaji(c).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join("-")
}
