//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::SessionSummaryError;
use storage::StorageError;

/// Errors emitted by session services.
///
/// The session state machine itself never fails; these come from recording a
/// finished game.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session was never started")]
    NotStarted,
    #[error("session is still running")]
    StillActive,
    #[error("session already recorded")]
    AlreadyRecorded,
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
