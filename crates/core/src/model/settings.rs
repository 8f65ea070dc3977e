use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("starting lives must be between 1 and {}", QuizSettings::MAX_STARTING_LIVES)]
    InvalidStartingLives,
}

/// Per-session quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    starting_lives: u32,
    shuffle_questions: bool,
}

impl QuizSettings {
    pub const DEFAULT_STARTING_LIVES: u32 = 3;
    pub const MAX_STARTING_LIVES: u32 = 99;

    /// # Errors
    ///
    /// Returns `SettingsError::InvalidStartingLives` if `starting_lives` is zero
    /// or above `MAX_STARTING_LIVES`.
    pub fn new(starting_lives: u32, shuffle_questions: bool) -> Result<Self, SettingsError> {
        if !(1..=Self::MAX_STARTING_LIVES).contains(&starting_lives) {
            return Err(SettingsError::InvalidStartingLives);
        }
        Ok(Self {
            starting_lives,
            shuffle_questions,
        })
    }

    #[must_use]
    pub fn starting_lives(&self) -> u32 {
        self.starting_lives
    }

    #[must_use]
    pub fn shuffle_questions(&self) -> bool {
        self.shuffle_questions
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            starting_lives: Self::DEFAULT_STARTING_LIVES,
            shuffle_questions: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_lives_rejected() {
        assert_eq!(
            QuizSettings::new(0, false).unwrap_err(),
            SettingsError::InvalidStartingLives
        );
        assert_eq!(QuizSettings::default().starting_lives(), 3);
    }

    #[test]
    fn lives_are_capped() {
        assert_eq!(
            QuizSettings::new(QuizSettings::MAX_STARTING_LIVES + 1, false).unwrap_err(),
            SettingsError::InvalidStartingLives
        );
        assert_eq!(
            QuizSettings::new(QuizSettings::MAX_STARTING_LIVES, true)
                .unwrap()
                .starting_lives(),
            99
        );
    }
}
