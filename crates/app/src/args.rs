use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use quiz_core::model::QuizSettings;
use quiz_core::syllabary::Syllabary;

#[derive(Debug, PartialEq, Eq)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidLives { raw: String },
    InvalidTimeout { raw: String },
    InvalidDbUrl { raw: String },
    InvalidSyllabary { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidLives { raw } => write!(
                f,
                "invalid --lives value: {raw} (expected 1-{})",
                QuizSettings::MAX_STARTING_LIVES
            ),
            ArgsError::InvalidTimeout { raw } => {
                write!(f, "invalid --questions-timeout value: {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSyllabary { raw } => {
                write!(f, "unknown syllabary: {raw} (expected hiragana or katakana)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app play       [--category <name|id>] [--lives <n>] [--shuffle] [common]");
    eprintln!("  app categories");
    eprintln!("  app kana       [hiragana|katakana] [--say <text>]");
    eprintln!("  app import     --file <questions.json> [common]");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --db <sqlite_url>          question cache (default: sqlite:quiz_cache.sqlite3)");
    eprintln!("  --questions-url <url>      remote question feed");
    eprintln!("  --questions-timeout <secs> remote feed timeout (default: 10)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_QUESTIONS_URL, QUIZ_QUESTIONS_TIMEOUT, QUIZ_CATEGORY, QUIZ_LIVES, QUIZ_TTS_COMMAND, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Categories,
    Kana {
        syllabary: Option<Syllabary>,
        say: Option<String>,
    },
    Import {
        file: PathBuf,
    },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub db_url: String,
    pub questions_url: Option<String>,
    pub questions_timeout: Option<Duration>,
    pub category: Option<String>,
    pub settings: QuizSettings,
}

/// Environment defaults, read once so parsing stays deterministic in tests.
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub db_url: Option<String>,
    pub questions_url: Option<String>,
    pub questions_timeout: Option<String>,
    pub category: Option<String>,
    pub lives: Option<String>,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        let var = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
        };
        Self {
            db_url: var("QUIZ_DB_URL"),
            questions_url: var("QUIZ_QUESTIONS_URL"),
            questions_timeout: var("QUIZ_QUESTIONS_TIMEOUT"),
            category: var("QUIZ_CATEGORY"),
            lives: var("QUIZ_LIVES"),
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_lives(raw: String) -> Result<u32, ArgsError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|lives| (1..=QuizSettings::MAX_STARTING_LIVES).contains(lives))
        .ok_or(ArgsError::InvalidLives { raw })
}

fn parse_timeout(raw: String) -> Result<Duration, ArgsError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
        .ok_or(ArgsError::InvalidTimeout { raw })
}

impl Args {
    pub fn parse(argv: Vec<String>, env: EnvDefaults) -> Result<Self, ArgsError> {
        let mut iter = argv.into_iter().peekable();

        // Default behavior: start a quiz when no subcommand is provided.
        let mut command = match iter.peek().map(String::as_str) {
            None => Command::Play,
            Some(first) if first.starts_with('-') => Command::Play,
            Some("play") => Command::Play,
            Some("categories") => Command::Categories,
            Some("kana") => Command::Kana {
                syllabary: None,
                say: None,
            },
            Some("import") => Command::Import {
                file: PathBuf::new(),
            },
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_string())),
        };
        if iter.peek().is_some_and(|first| !first.starts_with('-')) {
            iter.next();
        }

        let mut db_url = env
            .db_url
            .unwrap_or_else(|| "sqlite:quiz_cache.sqlite3".to_string());
        let mut questions_url = env.questions_url;
        let mut questions_timeout = env.questions_timeout.map(parse_timeout).transpose()?;
        let mut category = env.category;
        let mut lives = match env.lives {
            Some(raw) => parse_lives(raw)?,
            None => QuizSettings::DEFAULT_STARTING_LIVES,
        };
        let mut shuffle = false;
        let mut import_file: Option<PathBuf> = None;

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut iter, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--questions-url" => {
                    questions_url = Some(require_value(&mut iter, "--questions-url")?);
                }
                "--questions-timeout" => {
                    questions_timeout = Some(parse_timeout(require_value(
                        &mut iter,
                        "--questions-timeout",
                    )?)?);
                }
                "--category" => category = Some(require_value(&mut iter, "--category")?),
                "--lives" => lives = parse_lives(require_value(&mut iter, "--lives")?)?,
                "--shuffle" => shuffle = true,
                "--file" => import_file = Some(PathBuf::from(require_value(&mut iter, "--file")?)),
                "--say" => {
                    let value = require_value(&mut iter, "--say")?;
                    if let Command::Kana { say, .. } = &mut command {
                        *say = Some(value);
                    } else {
                        return Err(ArgsError::UnknownArg(arg));
                    }
                }
                "--help" | "-h" => command = Command::Help,
                other => match &mut command {
                    Command::Kana { syllabary, .. } if syllabary.is_none() => {
                        *syllabary = Some(Syllabary::from_name(other).ok_or_else(|| {
                            ArgsError::InvalidSyllabary {
                                raw: other.to_string(),
                            }
                        })?);
                    }
                    _ => return Err(ArgsError::UnknownArg(arg)),
                },
            }
        }

        if let Command::Import { file } = &mut command {
            *file = import_file.ok_or(ArgsError::MissingValue { flag: "--file" })?;
        }

        // `parse_lives` already enforced the range.
        let settings = QuizSettings::new(lives, shuffle)
            .map_err(|_| ArgsError::InvalidLives { raw: lives.to_string() })?;

        Ok(Self {
            command,
            db_url: normalize_sqlite_url(db_url),
            questions_url,
            questions_timeout,
            category,
            settings,
        })
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}
