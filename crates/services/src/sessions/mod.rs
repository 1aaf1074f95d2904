mod progress;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::{SessionSnapshot, SessionState};
pub use service::GameSession;
pub use workflow::{FinishedGame, GameLoopService};
