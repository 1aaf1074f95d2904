//! Cross-session progress: operator mastery, XP and recent scores.

use quiz_core::model::{Operator, OperatorStats, SessionSummary};

/// One line of the skills breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillLine {
    pub operator: Operator,
    pub attempts: u32,
    pub correct: u32,
    pub accuracy: u32,
}

/// Operator mastery aggregated over stored games.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasteryReport {
    stats: OperatorStats,
    games: usize,
}

impl MasteryReport {
    #[must_use]
    pub fn from_history(history: &[SessionSummary]) -> Self {
        let mut stats = OperatorStats::new();
        for game in history {
            stats.absorb(game.operator_stats());
        }
        Self {
            stats,
            games: history.len(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> &OperatorStats {
        &self.stats
    }

    /// Number of games the report was built from.
    #[must_use]
    pub fn games(&self) -> usize {
        self.games
    }

    /// Operators with at least one attempt, in canonical order.
    #[must_use]
    pub fn practiced(&self) -> Vec<SkillLine> {
        self.stats
            .iter()
            .filter(|(_, tally)| tally.attempts > 0)
            .map(|(operator, tally)| SkillLine {
                operator,
                attempts: tally.attempts,
                correct: tally.correct,
                accuracy: tally.accuracy(),
            })
            .collect()
    }
}

/// Sum of scores across `history`.
#[must_use]
pub fn total_xp(history: &[SessionSummary]) -> u64 {
    history.iter().map(|game| u64::from(game.score())).sum()
}

/// The latest `n` scores, oldest first, from a most-recent-first history.
#[must_use]
pub fn recent_scores(history: &[SessionSummary], n: usize) -> Vec<u32> {
    let mut scores: Vec<u32> = history.iter().take(n).map(SessionSummary::score).collect();
    scores.reverse();
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn game(score: u32, answers: &[(Operator, bool)]) -> SessionSummary {
        let mut stats = OperatorStats::new();
        for (op, ok) in answers {
            stats.record(*op, *ok);
        }
        let total = stats.total_attempts();
        let correct = stats.total_correct();
        SessionSummary::new(fixed_now(), score, 0, total, correct, stats).unwrap()
    }

    #[test]
    fn mastery_sums_across_games() {
        let history = vec![
            game(30, &[(Operator::Add, true), (Operator::Add, false)]),
            game(12, &[(Operator::Add, true), (Operator::Multiply, true)]),
        ];
        let report = MasteryReport::from_history(&history);

        assert_eq!(report.games(), 2);
        let lines = report.practiced();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            SkillLine {
                operator: Operator::Add,
                attempts: 3,
                correct: 2,
                accuracy: 67
            }
        );
        assert_eq!(lines[1].operator, Operator::Multiply);
        assert_eq!(lines[1].accuracy, 100);
    }

    #[test]
    fn empty_history_has_no_practiced_skills() {
        let report = MasteryReport::from_history(&[]);
        assert!(report.practiced().is_empty());
        assert_eq!(total_xp(&[]), 0);
    }

    #[test]
    fn recent_scores_are_oldest_first() {
        let history: Vec<_> = [50, 40, 30, 20].iter().map(|s| game(*s, &[])).collect();
        assert_eq!(total_xp(&history), 140);
        assert_eq!(recent_scores(&history, 3), vec![30, 40, 50]);
        assert_eq!(recent_scores(&history, 10), vec![20, 30, 40, 50]);
    }
}
