use crate::model::Operator;

/// Rounds `100 * part / whole` to the nearest whole percent, halves rounding up.
///
/// Returns `0` when `whole` is zero.
#[must_use]
pub fn rounded_percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = u64::from(part);
    let whole = u64::from(whole);
    let pct = (200 * part + whole) / (2 * whole);
    u32::try_from(pct).unwrap_or(u32::MAX)
}

//
// ─── TALLY ────────────────────────────────────────────────────────────────────
//

/// Attempts and correct answers for a single operator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperatorTally {
    pub attempts: u32,
    pub correct: u32,
}

impl OperatorTally {
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        rounded_percent(self.correct, self.attempts)
    }
}

//
// ─── PER-OPERATOR STATS ───────────────────────────────────────────────────────
//

/// Per-operator skill buckets covering all four operators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorStats {
    tallies: [OperatorTally; 4],
}

impl OperatorStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, op: Operator) -> OperatorTally {
        self.tallies[op.index()]
    }

    /// Counts one attempt for `op`, and one correct answer when `correct`.
    pub fn record(&mut self, op: Operator, correct: bool) {
        let tally = &mut self.tallies[op.index()];
        tally.attempts = tally.attempts.saturating_add(1);
        if correct {
            tally.correct = tally.correct.saturating_add(1);
        }
    }

    /// Adds every tally of `other` into `self`.
    pub fn absorb(&mut self, other: &OperatorStats) {
        for (mine, theirs) in self.tallies.iter_mut().zip(other.tallies.iter()) {
            mine.attempts = mine.attempts.saturating_add(theirs.attempts);
            mine.correct = mine.correct.saturating_add(theirs.correct);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Operator, OperatorTally)> + '_ {
        Operator::ALL.iter().map(|op| (*op, self.get(*op)))
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.tallies
            .iter()
            .fold(0_u32, |acc, t| acc.saturating_add(t.attempts))
    }

    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.tallies
            .iter()
            .fold(0_u32, |acc, t| acc.saturating_add(t.correct))
    }
}
