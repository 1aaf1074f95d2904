use std::fmt;
use thiserror::Error;

use crate::model::Operator;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DifficultyError {
    #[error("difficulty level must be 1, 2 or 3, got {0}")]
    OutOfRange(u8),
}

//
// ─── DIFFICULTY ───────────────────────────────────────────────────────────────
//

/// Three-step difficulty ladder.
///
/// Each level widens the operand range (`level * 10`) and unlocks one more
/// operator: level 1 practices `+ -`, level 2 adds `*`, level 3 adds `/`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Converts a numeric level (1-3) to a `Difficulty`.
    ///
    /// # Errors
    ///
    /// Returns `DifficultyError::OutOfRange` for any other value.
    pub fn from_level(level: u8) -> Result<Self, DifficultyError> {
        match level {
            1 => Ok(Self::Easy),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Hard),
            _ => Err(DifficultyError::OutOfRange(level)),
        }
    }

    #[must_use]
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Upper bound for generated operands.
    #[must_use]
    pub fn max_operand(self) -> u32 {
        u32::from(self.level()) * 10
    }

    /// Operators a question at this level may draw from.
    #[must_use]
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Difficulty::Easy => &Operator::ALL[..2],
            Difficulty::Medium => &Operator::ALL[..3],
            Difficulty::Hard => &Operator::ALL,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}", self.level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_conversion_round_trips_and_rejects_out_of_range() {
        for level in 1..=3 {
            assert_eq!(Difficulty::from_level(level).unwrap().level(), level);
        }
        assert_eq!(
            Difficulty::from_level(0).unwrap_err(),
            DifficultyError::OutOfRange(0)
        );
        assert!(Difficulty::from_level(4).is_err());
    }

    #[test]
    fn operator_pool_grows_with_level() {
        assert_eq!(
            Difficulty::Easy.operators(),
            &[Operator::Add, Operator::Subtract]
        );
        assert_eq!(Difficulty::Medium.operators().len(), 3);
        assert!(Difficulty::Hard.operators().contains(&Operator::Divide));
        assert!(!Difficulty::Medium.operators().contains(&Operator::Divide));
    }

    #[test]
    fn max_operand_scales_by_ten() {
        assert_eq!(Difficulty::Easy.max_operand(), 10);
        assert_eq!(Difficulty::Hard.max_operand(), 30);
    }
}
