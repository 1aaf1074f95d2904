use serde::Deserialize;
use thiserror::Error;

use crate::model::Difficulty;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameSettingsError {
    #[error("round length must be > 0 seconds")]
    InvalidRoundSeconds,

    #[error("base points must be > 0")]
    InvalidBasePoints,

    #[error("hard score threshold ({hard}) must be above the medium threshold ({medium})")]
    InvalidThresholds { medium: u32, hard: u32 },

    #[error("history limit must be > 0")]
    InvalidHistoryLimit,
}

//
// ─── SETTINGS ──────────────────────────────────────────────────────────────────
//

/// Tunable rules for a timed round.
///
/// Defaults give a 60 second round, `10 + streak * 2` points per correct
/// answer, +2 s for a hit, -5 s for a miss, and difficulty steps above
/// 50 and 100 points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    round_seconds: u16,
    base_points: u32,
    streak_bonus: u32,
    correct_time_bonus: u16,
    wrong_time_penalty: u16,
    medium_score_threshold: u32,
    hard_score_threshold: u32,
    history_limit: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            round_seconds: 60,
            base_points: 10,
            streak_bonus: 2,
            correct_time_bonus: 2,
            wrong_time_penalty: 5,
            medium_score_threshold: 50,
            hard_score_threshold: 100,
            history_limit: 20,
        }
    }
}

impl GameSettings {
    #[must_use]
    pub fn round_seconds(&self) -> u16 {
        self.round_seconds
    }

    #[must_use]
    pub fn base_points(&self) -> u32 {
        self.base_points
    }

    #[must_use]
    pub fn streak_bonus(&self) -> u32 {
        self.streak_bonus
    }

    #[must_use]
    pub fn correct_time_bonus(&self) -> u16 {
        self.correct_time_bonus
    }

    #[must_use]
    pub fn wrong_time_penalty(&self) -> u16 {
        self.wrong_time_penalty
    }

    #[must_use]
    pub fn medium_score_threshold(&self) -> u32 {
        self.medium_score_threshold
    }

    #[must_use]
    pub fn hard_score_threshold(&self) -> u32 {
        self.hard_score_threshold
    }

    /// Maximum number of finished games kept in history.
    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }

    /// Points awarded for a correct answer that brings the streak to `streak`.
    #[must_use]
    pub fn points_for_streak(&self, streak: u32) -> u32 {
        self.base_points
            .saturating_add(streak.saturating_mul(self.streak_bonus))
    }

    /// Difficulty implied by `score`: strictly above a threshold moves up a level.
    #[must_use]
    pub fn difficulty_for_score(&self, score: u32) -> Difficulty {
        if score > self.hard_score_threshold {
            Difficulty::Hard
        } else if score > self.medium_score_threshold {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Partially specified settings, e.g. parsed from a config file.
///
/// Missing fields fall back to [`GameSettings::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSettingsDraft {
    pub round_seconds: Option<u16>,
    pub base_points: Option<u32>,
    pub streak_bonus: Option<u32>,
    pub correct_time_bonus: Option<u16>,
    pub wrong_time_penalty: Option<u16>,
    pub medium_score_threshold: Option<u32>,
    pub hard_score_threshold: Option<u32>,
    pub history_limit: Option<usize>,
}

impl GameSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `GameSettingsError` if the round length, base points or history
    /// limit is zero, or the hard threshold is not above the medium one.
    pub fn validate(self) -> Result<GameSettings, GameSettingsError> {
        let defaults = GameSettings::default();
        let settings = GameSettings {
            round_seconds: self.round_seconds.unwrap_or(defaults.round_seconds),
            base_points: self.base_points.unwrap_or(defaults.base_points),
            streak_bonus: self.streak_bonus.unwrap_or(defaults.streak_bonus),
            correct_time_bonus: self
                .correct_time_bonus
                .unwrap_or(defaults.correct_time_bonus),
            wrong_time_penalty: self
                .wrong_time_penalty
                .unwrap_or(defaults.wrong_time_penalty),
            medium_score_threshold: self
                .medium_score_threshold
                .unwrap_or(defaults.medium_score_threshold),
            hard_score_threshold: self
                .hard_score_threshold
                .unwrap_or(defaults.hard_score_threshold),
            history_limit: self.history_limit.unwrap_or(defaults.history_limit),
        };

        if settings.round_seconds == 0 {
            return Err(GameSettingsError::InvalidRoundSeconds);
        }
        if settings.base_points == 0 {
            return Err(GameSettingsError::InvalidBasePoints);
        }
        if settings.hard_score_threshold <= settings.medium_score_threshold {
            return Err(GameSettingsError::InvalidThresholds {
                medium: settings.medium_score_threshold,
                hard: settings.hard_score_threshold,
            });
        }
        if settings.history_limit == 0 {
            return Err(GameSettingsError::InvalidHistoryLimit);
        }

        Ok(settings)
    }
}
