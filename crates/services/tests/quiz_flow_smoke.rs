use std::sync::{Arc, Mutex};

use quiz_core::model::{Category, QuizSettings};
use quiz_core::quiz::{Cue, Intent, Outcome};
use quiz_core::time::fixed_clock;
use services::{
    BundledQuestions, FeedbackAudio, Playback, Pronouncer, QuestionLoader, QuestionOrigin,
    QuizService,
};
use storage::repository::Storage;

#[derive(Default)]
struct RecordingPlayback {
    spoken: Mutex<Vec<String>>,
    stops: Mutex<usize>,
    cues: Mutex<Vec<Cue>>,
}

impl Pronouncer for RecordingPlayback {
    fn speak(&self, text: &str, _locale: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

impl FeedbackAudio for RecordingPlayback {
    fn play(&self, cue: Cue) {
        self.cues.lock().unwrap().push(cue);
    }
}

fn build_service(recorder: &Arc<RecordingPlayback>, settings: QuizSettings) -> QuizService {
    let storage = Storage::in_memory();
    let loader = QuestionLoader::new(
        fixed_clock(),
        storage.question_cache,
        Arc::new(BundledQuestions::embedded()),
    );
    let playback = Playback::new(recorder.clone(), recorder.clone());
    QuizService::new(Arc::new(loader), playback).with_settings(settings)
}

#[tokio::test]
async fn perfect_run_through_bundled_category_completes() {
    let recorder = Arc::new(RecordingPlayback::default());
    let svc = build_service(&recorder, QuizSettings::default());

    let started = svc.start(Category::by_name("Animales")).await.unwrap();
    assert_eq!(started.origin, QuestionOrigin::Bundled);
    let mut session = started.session;
    let total = session.questions().len();
    assert!(total > 1);

    while let Some(question) = session.current_question() {
        let correct = question.correct_answer().to_string();
        svc.dispatch(&mut session, Intent::Select(correct)).unwrap();
        svc.dispatch(&mut session, Intent::Submit).unwrap();
        svc.dispatch(&mut session, Intent::Advance).unwrap();
    }

    assert_eq!(session.outcome(), Outcome::Completed);
    assert_eq!(session.summary().correct as usize, total);
    assert_eq!(session.lives_remaining(), 3);

    let cues = recorder.cues.lock().unwrap().clone();
    assert_eq!(cues.len(), total + 1);
    assert_eq!(cues.last(), Some(&Cue::SessionEnd));
    assert!(cues[..total].iter().all(|c| *c == Cue::Correct));
}

#[tokio::test]
async fn wrong_answers_exhaust_lives() {
    let recorder = Arc::new(RecordingPlayback::default());
    let svc = build_service(&recorder, QuizSettings::new(2, false).unwrap());

    let mut session = svc.start_named("1").await.unwrap().session;
    while let Some(question) = session.current_question() {
        let wrong = question
            .answers()
            .iter()
            .find(|a| !question.is_correct(a))
            .cloned()
            .unwrap();
        svc.dispatch(&mut session, Intent::Select(wrong)).unwrap();
        svc.dispatch(&mut session, Intent::Submit).unwrap();
        svc.dispatch(&mut session, Intent::Advance).unwrap();
    }

    assert_eq!(session.outcome(), Outcome::Lost);
    assert_eq!(session.current_index(), 2);
    assert_eq!(session.correct_count(), 0);

    // Animal answers are written in kana, so every selection was pronounced and
    // each later utterance interrupted the previous one.
    let spoken = recorder.spoken.lock().unwrap().len();
    assert_eq!(spoken, 2);
    assert_eq!(*recorder.stops.lock().unwrap(), 1);
}
