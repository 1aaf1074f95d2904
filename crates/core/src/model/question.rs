use std::fmt;

use crate::model::{Difficulty, Operator};

/// Number of answer options presented with every question.
pub const OPTION_COUNT: usize = 4;

/// A generated arithmetic problem with its shuffled answer options.
///
/// Questions are only built by [`crate::generator::QuestionGenerator`], so the
/// option invariants hold for every instance: four distinct values, the
/// correct answer among them, every distractor strictly positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    operand1: u32,
    operand2: u32,
    operator: Operator,
    correct_answer: i64,
    options: [i64; OPTION_COUNT],
    difficulty: Difficulty,
}

impl Question {
    pub(crate) fn new(
        operand1: u32,
        operand2: u32,
        operator: Operator,
        correct_answer: i64,
        options: [i64; OPTION_COUNT],
        difficulty: Difficulty,
    ) -> Self {
        Self {
            operand1,
            operand2,
            operator,
            correct_answer,
            options,
            difficulty,
        }
    }

    #[must_use]
    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    #[must_use]
    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    #[must_use]
    pub fn operator(&self) -> Operator {
        self.operator
    }

    #[must_use]
    pub fn correct_answer(&self) -> i64 {
        self.correct_answer
    }

    #[must_use]
    pub fn options(&self) -> &[i64; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Exact comparison against the correct answer.
    #[must_use]
    pub fn is_correct(&self, candidate: i64) -> bool {
        candidate == self.correct_answer
    }

    /// The problem without the answer placeholder, e.g. `"7 × 3"`.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "{} {} {}",
            self.operand1,
            self.operator.glyph(),
            self.operand2
        )
    }

    /// Text shown to the player, e.g. `"7 × 3 = ?"`.
    #[must_use]
    pub fn display_text(&self) -> String {
        format!("{} = ?", self.prompt())
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(operator: Operator) -> Question {
        Question::new(12, 4, operator, 3, [3, 1, 2, 4], Difficulty::Hard)
    }

    #[test]
    fn display_uses_player_glyphs() {
        assert_eq!(sample(Operator::Divide).display_text(), "12 ÷ 4 = ?");
        assert_eq!(sample(Operator::Multiply).to_string(), "12 × 4 = ?");
        assert_eq!(sample(Operator::Subtract).display_text(), "12 - 4 = ?");
    }

    #[test]
    fn prompt_drops_placeholder() {
        assert_eq!(sample(Operator::Divide).prompt(), "12 ÷ 4");
    }

    #[test]
    fn correctness_is_exact() {
        let q = sample(Operator::Divide);
        assert!(q.is_correct(3));
        assert!(!q.is_correct(4));
    }
}
