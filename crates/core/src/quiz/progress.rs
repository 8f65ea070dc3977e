use super::session::Outcome;

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub correct: u32,
    pub lives_remaining: u32,
    pub outcome: Outcome,
}

/// Final tally shown on the completion or loss screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSummary {
    pub total: usize,
    pub correct: u32,
    pub lives_remaining: u32,
    pub outcome: Outcome,
}
