#![forbid(unsafe_code)]

pub mod achievements;
pub mod error;
pub mod mastery;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::SessionError;
pub use mastery::{MasteryReport, SkillLine};
pub use sessions::{FinishedGame, GameLoopService, GameSession, SessionSnapshot, SessionState};
