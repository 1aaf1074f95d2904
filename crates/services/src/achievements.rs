//! Badge rules evaluated when a game is recorded.

use quiz_core::model::{Badge, SessionSummary};

use crate::mastery::total_xp;

pub const SCORE_BADGE_MIN: u32 = 200;
pub const STREAK_BADGE_MIN: u32 = 10;
pub const PERFECT_MIN_ATTEMPTS: u32 = 5;
pub const VETERAN_XP: u64 = 1000;

/// Badges earned by `summary`, given `history` (most recent first, already
/// including `summary`).
///
/// Returns every qualifying badge; filtering out ones unlocked earlier is the
/// badge repository's job.
#[must_use]
pub fn evaluate(summary: &SessionSummary, history: &[SessionSummary]) -> Vec<Badge> {
    Badge::ALL
        .into_iter()
        .filter(|badge| earned(*badge, summary, history))
        .collect()
}

fn earned(badge: Badge, summary: &SessionSummary, history: &[SessionSummary]) -> bool {
    match badge {
        Badge::FirstWin => !history.is_empty(),
        Badge::Score200 => summary.score() >= SCORE_BADGE_MIN,
        Badge::Streak10 => summary.max_streak() >= STREAK_BADGE_MIN,
        Badge::Perfect => {
            summary.accuracy() == 100 && summary.total_attempts() >= PERFECT_MIN_ATTEMPTS
        }
        Badge::Veteran => total_xp(history) >= VETERAN_XP,
    }
}
