mod category;
mod question;
mod settings;

pub use category::{Category, CategoryId};
pub use question::{Question, QuestionError, QuestionSet};
pub use settings::{QuizSettings, SettingsError};
