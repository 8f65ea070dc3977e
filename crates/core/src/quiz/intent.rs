use std::fmt;

/// A discrete user action forwarded by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(String),
    Submit,
    Advance,
}

/// Short feedback clips played after an answer is checked or the quiz ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Correct,
    Incorrect,
    SessionEnd,
}

impl Cue {
    /// Stable clip identifier handed to audio backends.
    #[must_use]
    pub fn clip_id(self) -> &'static str {
        match self {
            Cue::Correct => "correct",
            Cue::Incorrect => "incorrect",
            Cue::SessionEnd => "session_end",
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.clip_id())
    }
}

/// Fire-and-forget request emitted by a transition.
///
/// The engine never waits on these; whoever drives the session hands them to
/// the playback collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Speak { text: String, locale: &'static str },
    Cue(Cue),
}
