use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::syllabary::Syllabary;
use services::{
    BundledQuestions, LoggingPlayback, Playback, Pronouncer, QuestionLoader, QuestionOrigin,
    QuizService, RemoteQuestions, RemoteQuestionsConfig,
};
use storage::repository::Storage;
use tracing_subscriber::EnvFilter;

mod args;
mod speech;
mod terminal;

use args::{Args, ArgsError, Command, EnvDefaults, print_usage};
use speech::{CommandSpeaker, TerminalCues};
use terminal::Exit;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_playback() -> Playback {
    let speech: Arc<dyn Pronouncer> = match CommandSpeaker::from_env() {
        Some(speaker) => Arc::new(speaker),
        None => Arc::new(LoggingPlayback),
    };
    Playback::new(speech, Arc::new(TerminalCues))
}

async fn build_loader(parsed: &Args) -> Result<QuestionLoader, Box<dyn std::error::Error>> {
    // Open + migrate SQLite here so core/services stay free of file-system glue.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;

    let mut loader = QuestionLoader::new(
        Clock::system(),
        storage.question_cache,
        Arc::new(BundledQuestions::embedded()),
    );
    if let Some(url) = &parsed.questions_url {
        let mut config = RemoteQuestionsConfig::new(url.as_str());
        if let Some(timeout) = parsed.questions_timeout {
            config = config.with_timeout(timeout);
        }
        loader = loader.with_remote(Arc::new(RemoteQuestions::new(config)));
    }
    Ok(loader)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let parsed = Args::parse(argv, EnvDefaults::from_env()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match &parsed.command {
        Command::Help => {
            print_usage();
            Ok(())
        }
        Command::Categories => {
            terminal::print_categories(&mut std::io::stdout())?;
            Ok(())
        }
        Command::Kana { syllabary, say } => {
            let mut out = std::io::stdout();
            let charts = match syllabary {
                Some(one) => vec![*one],
                None => Syllabary::all().to_vec(),
            };
            for chart in charts {
                terminal::print_chart(chart, &mut out)?;
            }
            if let Some(text) = say {
                println!("{text}: {}", terminal::reading_of(text));
                build_playback().speak(text, quiz_core::script::JAPANESE_LOCALE);
            }
            Ok(())
        }
        Command::Import { file } => {
            let raw = std::fs::read_to_string(file)?;
            let loader = build_loader(&parsed).await?;
            let count = loader.import_json(&raw).await?;
            println!("imported {count} questions from {}", file.display());
            Ok(())
        }
        Command::Play => {
            let loader = build_loader(&parsed).await?;
            let service = QuizService::new(Arc::new(loader), build_playback())
                .with_settings(parsed.settings.clone());

            let started = match parsed.category.as_deref() {
                Some(raw) => service.start_named(raw).await?,
                None => service.start(None).await?,
            };
            if started.origin != QuestionOrigin::Remote && parsed.questions_url.is_some() {
                eprintln!("(sin conexión: usando preguntas guardadas)");
            }
            let mut session = started.session;

            // Terminal input blocks; keep it off the async workers.
            let exit = tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                let mut input = stdin.lock();
                let mut out = std::io::stdout();
                terminal::run_quiz(&service, &mut session, &mut input, &mut out)
            })
            .await??;

            if exit == Exit::Quit {
                tracing::info!("quiz abandoned");
            }
            Ok(())
        }
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
