mod intent;
mod progress;
mod session;

// Public API of the quiz engine.
pub use intent::{Cue, Effect, Intent};
pub use progress::{QuizProgress, QuizSummary};
pub use session::{Outcome, QuizError, QuizSession};
