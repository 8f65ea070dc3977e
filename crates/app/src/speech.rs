use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::Mutex;

use quiz_core::quiz::Cue;
use services::{FeedbackAudio, Pronouncer};

/// Speaks through an external program such as `say -v Kyoko` or `espeak-ng -v ja`.
///
/// The text is appended as the last argument. `stop` kills the process still
/// speaking, if any.
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    /// Parse a whitespace-separated command line; `None` when it is blank.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
            current: Mutex::new(None),
        })
    }

    pub fn from_env() -> Option<Self> {
        std::env::var("QUIZ_TTS_COMMAND")
            .ok()
            .and_then(|line| Self::from_command_line(&line))
    }
}

impl Pronouncer for CommandSpeaker {
    fn speak(&self, text: &str, locale: &str) {
        let spawned = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            Ok(child) => {
                if let Ok(mut slot) = self.current.lock() {
                    *slot = Some(child);
                }
            }
            Err(err) => {
                tracing::warn!(program = %self.program, locale, error = %err, "speech command failed");
            }
        }
    }

    fn stop(&self) {
        let Ok(mut slot) = self.current.lock() else {
            return;
        };
        if let Some(mut child) = slot.take() {
            // The process may already have exited; either way reap it.
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Feedback cues for a terminal: a bell on wrong answers, log lines otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalCues;

impl FeedbackAudio for TerminalCues {
    fn play(&self, cue: Cue) {
        tracing::debug!(clip = cue.clip_id(), "cue");
        if cue == Cue::Incorrect {
            let mut err = std::io::stderr();
            let _ = err.write_all(b"\x07");
            let _ = err.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_command_line() {
        let speaker = CommandSpeaker::from_command_line("say -v Kyoko").unwrap();
        assert_eq!(speaker.program, "say");
        assert_eq!(speaker.args, vec!["-v", "Kyoko"]);
        assert!(CommandSpeaker::from_command_line("   ").is_none());
    }

    #[test]
    fn missing_program_does_not_panic() {
        let speaker =
            CommandSpeaker::from_command_line("definitely-not-a-speech-program-xyz").unwrap();
        speaker.speak("ねこ", "ja-JP");
        speaker.stop();
    }
}
