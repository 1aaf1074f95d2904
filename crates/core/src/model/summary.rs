use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::OperatorStats;
use crate::model::stats::rounded_percent;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("correct answers ({correct}) exceed total attempts ({total})")]
    CorrectExceedsTotal { correct: u32, total: u32 },

    #[error("total attempts ({total}) does not match operator stats ({sum})")]
    StatsMismatch { total: u32, sum: u32 },
}

/// Final snapshot of a finished game, handed to history and achievements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    completed_at: DateTime<Utc>,
    score: u32,
    max_streak: u32,
    total_attempts: u32,
    correct_attempts: u32,
    operator_stats: OperatorStats,
}

impl SessionSummary {
    /// Build a summary from raw session counters.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::CorrectExceedsTotal` if `correct_attempts > total_attempts`.
    /// Returns `SessionSummaryError::StatsMismatch` if the operator stats do not add up to
    /// `total_attempts`.
    pub fn new(
        completed_at: DateTime<Utc>,
        score: u32,
        max_streak: u32,
        total_attempts: u32,
        correct_attempts: u32,
        operator_stats: OperatorStats,
    ) -> Result<Self, SessionSummaryError> {
        if correct_attempts > total_attempts {
            return Err(SessionSummaryError::CorrectExceedsTotal {
                correct: correct_attempts,
                total: total_attempts,
            });
        }
        let sum = operator_stats.total_attempts();
        if sum != total_attempts {
            return Err(SessionSummaryError::StatsMismatch {
                total: total_attempts,
                sum,
            });
        }

        Ok(Self {
            completed_at,
            score,
            max_streak,
            total_attempts,
            correct_attempts,
            operator_stats,
        })
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    #[must_use]
    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    /// Whole-percent accuracy, `0` when nothing was attempted.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        rounded_percent(self.correct_attempts, self.total_attempts)
    }

    #[must_use]
    pub fn operator_stats(&self) -> &OperatorStats {
        &self.operator_stats
    }
}
