use async_trait::async_trait;
use quiz_core::model::{Badge, SessionSummary};
use std::collections::{BTreeSet, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Repository contract for finished-game history.
///
/// History is ordered most recent first and capped by the implementation.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Record a finished game as the newest history entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the summary cannot be stored.
    async fn append_summary(&self, summary: &SessionSummary) -> Result<(), StorageError>;

    /// List stored games, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the history cannot be read.
    async fn list_history(&self) -> Result<Vec<SessionSummary>, StorageError>;
}

/// Repository contract for unlocked achievement badges.
#[async_trait]
pub trait BadgeRepository: Send + Sync {
    /// All badges unlocked so far.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if badges cannot be read.
    async fn unlocked_badges(&self) -> Result<BTreeSet<Badge>, StorageError>;

    /// Mark badges as unlocked, returning the ones that were not unlocked before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if badges cannot be stored.
    async fn unlock_badges(&self, badges: &[Badge]) -> Result<Vec<Badge>, StorageError>;
}

/// Default number of games kept by [`InMemoryRepository::new`].
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Simple in-memory repository for tests and the terminal driver.
#[derive(Clone)]
pub struct InMemoryRepository {
    history: Arc<Mutex<VecDeque<SessionSummary>>>,
    badges: Arc<Mutex<BTreeSet<Badge>>>,
    history_limit: usize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Repository keeping at most `limit` games (at least one).
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history: Arc::new(Mutex::new(VecDeque::new())),
            badges: Arc::new(Mutex::new(BTreeSet::new())),
            history_limit: limit.max(1),
        }
    }

    #[must_use]
    pub fn history_limit(&self) -> usize {
        self.history_limit
    }
}

#[async_trait]
impl HistoryRepository for InMemoryRepository {
    async fn append_summary(&self, summary: &SessionSummary) -> Result<(), StorageError> {
        let mut guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.push_front(summary.clone());
        guard.truncate(self.history_limit);
        Ok(())
    }

    async fn list_history(&self) -> Result<Vec<SessionSummary>, StorageError> {
        let guard = self
            .history
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.iter().cloned().collect())
    }
}

#[async_trait]
impl BadgeRepository for InMemoryRepository {
    async fn unlocked_badges(&self) -> Result<BTreeSet<Badge>, StorageError> {
        let guard = self
            .badges
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn unlock_badges(&self, badges: &[Badge]) -> Result<Vec<Badge>, StorageError> {
        let mut guard = self
            .badges
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(badges
            .iter()
            .copied()
            .filter(|badge| guard.insert(*badge))
            .collect())
    }
}

/// Aggregates history and badge repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub history: Arc<dyn HistoryRepository>,
    pub badges: Arc<dyn BadgeRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(history_limit: usize) -> Self {
        let repo = InMemoryRepository::with_history_limit(history_limit);
        let history: Arc<dyn HistoryRepository> = Arc::new(repo.clone());
        let badges: Arc<dyn BadgeRepository> = Arc::new(repo);
        Self { history, badges }
    }
}
