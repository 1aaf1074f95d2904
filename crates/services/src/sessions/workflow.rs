use rand::Rng;
use std::sync::Arc;

use quiz_core::model::{Badge, SessionSummary};
use storage::{BadgeRepository, HistoryRepository, Storage};

use super::service::GameSession;
use crate::Clock;
use crate::achievements;
use crate::error::SessionError;
use crate::mastery::MasteryReport;

/// Result of recording a finished game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedGame {
    pub summary: SessionSummary,
    /// Badges unlocked by this game that were not unlocked before.
    pub new_badges: Vec<Badge>,
}

/// Records finished sessions into history and evaluates achievements.
///
/// This service owns the time source and repository access; the session
/// itself stays free of I/O.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    history: Arc<dyn HistoryRepository>,
    badges: Arc<dyn BadgeRepository>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        history: Arc<dyn HistoryRepository>,
        badges: Arc<dyn BadgeRepository>,
    ) -> Self {
        Self {
            clock,
            history,
            badges,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.history),
            Arc::clone(&storage.badges),
        )
    }

    /// End `session`, append its summary to history and unlock earned badges.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` if the session never ran,
    /// `SessionError::AlreadyRecorded` if this round was recorded before, and
    /// `SessionError::Storage` on repository failures.
    pub async fn finish<R: Rng>(
        &self,
        session: &mut GameSession<R>,
    ) -> Result<FinishedGame, SessionError> {
        if session.is_recorded() {
            return Err(SessionError::AlreadyRecorded);
        }
        session.end();
        let summary = session.summary(self.clock.now())?;

        self.history.append_summary(&summary).await?;
        session.mark_recorded();

        let history = self.history.list_history().await?;
        let earned = achievements::evaluate(&summary, &history);
        let new_badges = self.badges.unlock_badges(&earned).await?;
        for badge in &new_badges {
            tracing::info!(badge = badge.id(), "badge unlocked");
        }

        Ok(FinishedGame {
            summary,
            new_badges,
        })
    }

    /// Stored games, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn history(&self) -> Result<Vec<SessionSummary>, SessionError> {
        Ok(self.history.list_history().await?)
    }

    /// Operator mastery across stored games.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn mastery(&self) -> Result<MasteryReport, SessionError> {
        let history = self.history.list_history().await?;
        Ok(MasteryReport::from_history(&history))
    }

    /// All badges unlocked so far.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn unlocked_badges(&self) -> Result<Vec<Badge>, SessionError> {
        Ok(self.badges.unlocked_badges().await?.into_iter().collect())
    }
}
