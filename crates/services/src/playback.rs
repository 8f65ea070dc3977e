//! Fire-and-forget collaborators for speech and feedback sounds.
//!
//! Implementations must not block: failures are theirs to report and never
//! reach the quiz engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use quiz_core::quiz::{Cue, Effect};

/// Speaks text aloud.
pub trait Pronouncer: Send + Sync {
    fn speak(&self, text: &str, locale: &str);

    /// Interrupt the utterance in progress, if any.
    fn stop(&self);
}

/// Plays a short clip for a feedback cue.
pub trait FeedbackAudio: Send + Sync {
    fn play(&self, cue: Cue);
}

/// Playback backend that only records the requests in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPlayback;

impl Pronouncer for LoggingPlayback {
    fn speak(&self, text: &str, locale: &str) {
        tracing::info!(text, locale, "speak");
    }

    fn stop(&self) {
        tracing::trace!("stop speech");
    }
}

impl FeedbackAudio for LoggingPlayback {
    fn play(&self, cue: Cue) {
        tracing::info!(clip = cue.clip_id(), "play cue");
    }
}

/// Routes engine effects to the playback collaborators.
///
/// Speech uses stop-then-speak: once anything has been spoken, each new
/// request interrupts the previous utterance first.
#[derive(Clone)]
pub struct Playback {
    speech: Arc<dyn Pronouncer>,
    audio: Arc<dyn FeedbackAudio>,
    has_spoken: Arc<AtomicBool>,
}

impl Playback {
    #[must_use]
    pub fn new(speech: Arc<dyn Pronouncer>, audio: Arc<dyn FeedbackAudio>) -> Self {
        Self {
            speech,
            audio,
            has_spoken: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn logging() -> Self {
        Self::new(Arc::new(LoggingPlayback), Arc::new(LoggingPlayback))
    }

    pub fn speak(&self, text: &str, locale: &str) {
        if self.has_spoken.swap(true, Ordering::Relaxed) {
            self.speech.stop();
        }
        self.speech.speak(text, locale);
    }

    pub fn play(&self, cue: Cue) {
        self.audio.play(cue);
    }

    pub fn apply(&self, effects: &[Effect]) {
        for effect in effects {
            match effect {
                Effect::Speak { text, locale } => self.speak(text, locale),
                Effect::Cue(cue) => self.play(*cue),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<String>>,
    }

    impl Pronouncer for Recorder {
        fn speak(&self, text: &str, locale: &str) {
            self.calls.lock().unwrap().push(format!("speak {text} {locale}"));
        }

        fn stop(&self) {
            self.calls.lock().unwrap().push("stop".into());
        }
    }

    impl FeedbackAudio for Recorder {
        fn play(&self, cue: Cue) {
            self.calls.lock().unwrap().push(format!("play {cue}"));
        }
    }

    #[test]
    fn second_utterance_stops_the_first() {
        let recorder = Arc::new(Recorder::default());
        let playback = Playback::new(recorder.clone(), recorder.clone());

        playback.apply(&[
            Effect::Speak {
                text: "いぬ".into(),
                locale: "ja-JP",
            },
            Effect::Cue(Cue::Correct),
            Effect::Speak {
                text: "ねこ".into(),
                locale: "ja-JP",
            },
        ]);

        let calls = recorder.calls.lock().unwrap().clone();
        assert_eq!(
            calls,
            vec![
                "speak いぬ ja-JP",
                "play correct",
                "stop",
                "speak ねこ ja-JP",
            ]
        );
    }
}
