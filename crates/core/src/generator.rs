use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::{Difficulty, OPTION_COUNT, Operator, Question};

//
// ─── LIMITS ────────────────────────────────────────────────────────────────────
//

/// Proposals drawn near the correct answer before the safety valve opens.
pub const NEARBY_PROPOSALS: u32 = 50;

/// Proposals (in total) after which random picks give way to a deterministic sweep.
pub const RANDOM_PROPOSALS: u32 = 150;

/// Upper bound for safety-valve picks.
pub const RANDOM_DISTRACTOR_MAX: i64 = 100;

/// Inclusive offset range for nearby distractors.
const NEARBY_OFFSETS: std::ops::RangeInclusive<i64> = -5..=4;

/// Inclusive quotient range for division questions.
const QUOTIENTS: std::ops::RangeInclusive<u32> = 1..=10;

//
// ─── OPTION SET ────────────────────────────────────────────────────────────────
//

/// Shuffled answer options plus the number of proposals it took to fill them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSet {
    pub options: [i64; OPTION_COUNT],
    pub proposals: u32,
}

//
// ─── GENERATOR ─────────────────────────────────────────────────────────────────
//

/// Builds adaptive arithmetic questions from an injected random source.
///
/// Use [`QuestionGenerator::seeded`] for reproducible sequences and
/// [`QuestionGenerator::from_os_rng`] for play.
///
/// # Examples
///
/// ```
/// # use quiz_core::generator::QuestionGenerator;
/// # use quiz_core::model::Difficulty;
/// let mut generator = QuestionGenerator::seeded(7);
/// let question = generator.generate(Difficulty::Easy);
/// assert!(question.options().contains(&question.correct_answer()));
/// ```
#[derive(Debug, Clone)]
pub struct QuestionGenerator<R = StdRng> {
    rng: R,
}

impl QuestionGenerator<StdRng> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<R: Rng> QuestionGenerator<R> {
    #[must_use]
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one question for `difficulty`.
    pub fn generate(&mut self, difficulty: Difficulty) -> Question {
        let operator = self.pick_operator(difficulty);
        let max = difficulty.max_operand();

        let (operand1, operand2, correct_answer) = if operator == Operator::Divide {
            // Pick divisor and quotient first so the dividend divides exactly.
            let divisor = self.rng.random_range(2..=max / 2 + 1);
            let quotient = self.rng.random_range(QUOTIENTS);
            (divisor * quotient, divisor, i64::from(quotient))
        } else {
            let a = self.rng.random_range(1..=max);
            let b = self.rng.random_range(1..=max);
            (a, b, non_division_answer(operator, a, b))
        };

        let OptionSet { options, .. } = self.options_for(correct_answer);
        Question::new(
            operand1,
            operand2,
            operator,
            correct_answer,
            options,
            difficulty,
        )
    }

    fn pick_operator(&mut self, difficulty: Difficulty) -> Operator {
        let pool = difficulty.operators();
        pool[self.rng.random_range(0..pool.len())]
    }

    /// Synthesize three distractors around `correct` and shuffle all four options.
    ///
    /// The first [`NEARBY_PROPOSALS`] proposals are `correct + offset` with an
    /// offset in `-5..=4`. Past that, proposals are uniform in
    /// `1..=RANDOM_DISTRACTOR_MAX`, and past [`RANDOM_PROPOSALS`] the smallest
    /// unused positive integer is taken. Distractors are always positive and
    /// distinct, so the loop ends after at most `RANDOM_PROPOSALS + 3` proposals.
    pub fn options_for(&mut self, correct: i64) -> OptionSet {
        let mut options = [correct; OPTION_COUNT];
        let mut filled = 1;
        let mut proposals = 0_u32;

        while filled < OPTION_COUNT {
            proposals += 1;
            let candidate = if proposals > RANDOM_PROPOSALS {
                let mut next = 1;
                while options[..filled].contains(&next) {
                    next += 1;
                }
                next
            } else if proposals > NEARBY_PROPOSALS {
                if proposals == NEARBY_PROPOSALS + 1 {
                    tracing::warn!(correct, "distractor safety valve engaged");
                }
                self.rng.random_range(1..=RANDOM_DISTRACTOR_MAX)
            } else {
                correct + self.rng.random_range(NEARBY_OFFSETS)
            };

            if candidate > 0 && !options[..filled].contains(&candidate) {
                options[filled] = candidate;
                filled += 1;
            }
        }

        options.shuffle(&mut self.rng);
        OptionSet { options, proposals }
    }
}

fn non_division_answer(operator: Operator, a: u32, b: u32) -> i64 {
    let (a, b) = (i64::from(a), i64::from(b));
    match operator {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a / b,
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const LEVELS: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    fn assert_well_formed(q: &Question) {
        let options = q.options();
        let distinct: HashSet<_> = options.iter().collect();
        assert_eq!(distinct.len(), OPTION_COUNT, "duplicate option in {q:?}");
        assert!(options.contains(&q.correct_answer()), "missing answer in {q:?}");
        for value in options.iter().filter(|v| **v != q.correct_answer()) {
            assert!(*value > 0, "non-positive distractor in {q:?}");
        }
        if q.correct_answer() > 0 {
            assert!(options.iter().all(|v| *v > 0));
        }
    }

    #[test]
    fn options_are_well_formed_at_every_level() {
        let mut generator = QuestionGenerator::seeded(42);
        for level in LEVELS {
            for _ in 0..10_000 {
                let q = generator.generate(level);
                assert_eq!(q.difficulty(), level);
                assert_well_formed(&q);
            }
        }
    }

    #[test]
    fn operators_respect_level_pool() {
        let mut generator = QuestionGenerator::seeded(1);
        for level in LEVELS {
            let mut seen = HashSet::new();
            for _ in 0..2_000 {
                seen.insert(generator.generate(level).operator());
            }
            let pool: HashSet<_> = level.operators().iter().copied().collect();
            assert_eq!(seen, pool);
        }
    }

    #[test]
    fn operands_stay_within_level_range() {
        let mut generator = QuestionGenerator::seeded(9);
        for level in LEVELS {
            let max = level.max_operand();
            for _ in 0..2_000 {
                let q = generator.generate(level);
                if q.operator() != Operator::Divide {
                    assert!((1..=max).contains(&q.operand1()));
                    assert!((1..=max).contains(&q.operand2()));
                }
            }
        }
    }

    #[test]
    fn division_is_always_exact() {
        let mut generator = QuestionGenerator::seeded(3);
        let mut divisions = 0;
        for _ in 0..10_000 {
            let q = generator.generate(Difficulty::Hard);
            if q.operator() != Operator::Divide {
                continue;
            }
            divisions += 1;
            assert!((2..=16).contains(&q.operand2()));
            assert_eq!(q.operand1() % q.operand2(), 0);
            assert_eq!(i64::from(q.operand1() / q.operand2()), q.correct_answer());
            assert!((1..=10).contains(&q.correct_answer()));
        }
        assert!(divisions > 0);
    }

    #[test]
    fn subtraction_may_go_negative() {
        let mut generator = QuestionGenerator::seeded(5);
        let negative = (0..5_000)
            .map(|_| generator.generate(Difficulty::Easy))
            .find(|q| q.correct_answer() < 0)
            .expect("a negative difference within 5000 draws");
        assert_eq!(negative.operator(), Operator::Subtract);
        assert_well_formed(&negative);
    }

    #[test]
    fn safety_valve_bounds_small_answers() {
        let mut generator = QuestionGenerator::seeded(11);
        for correct in [1, 0, -4, -20] {
            for _ in 0..500 {
                let set = generator.options_for(correct);
                assert!(set.proposals <= 200, "{correct}: {} proposals", set.proposals);
                assert!(set.options.contains(&correct));
                let distinct: HashSet<_> = set.options.iter().collect();
                assert_eq!(distinct.len(), OPTION_COUNT);
            }
        }
    }

    #[test]
    fn negative_answers_fall_back_to_valve_range() {
        let mut generator = QuestionGenerator::seeded(13);
        let set = generator.options_for(-20);
        assert!(set.proposals > NEARBY_PROPOSALS);
        for value in set.options.iter().filter(|v| **v != -20) {
            assert!((1..=RANDOM_DISTRACTOR_MAX).contains(value));
        }
    }

    /// Always yields zero, so every range sample lands on its lower bound.
    struct StuckRng;

    impl rand::RngCore for StuckRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(0);
        }
    }

    #[test]
    fn sweep_terminates_when_random_picks_never_fit() {
        let mut generator = QuestionGenerator::with_rng(StuckRng);
        // Nearby picks are all `1 - 5`, valve picks are all `1`: both rejected.
        let set = generator.options_for(1);
        assert_eq!(set.proposals, RANDOM_PROPOSALS + 3);

        let mut options = set.options;
        options.sort_unstable();
        assert_eq!(options, [1, 2, 3, 4]);
    }

    #[test]
    fn stuck_rng_still_yields_well_formed_questions() {
        let mut generator = QuestionGenerator::with_rng(StuckRng);
        for level in LEVELS {
            let q = generator.generate(level);
            assert_well_formed(&q);
        }
    }

    #[test]
    fn same_seed_reproduces_questions() {
        let mut a = QuestionGenerator::seeded(2024);
        let mut b = QuestionGenerator::seeded(2024);
        for level in LEVELS {
            assert_eq!(a.generate(level), b.generate(level));
        }
    }
}
