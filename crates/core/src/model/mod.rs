mod badge;
mod difficulty;
mod mistake;
mod operator;
mod question;
pub mod stats;
mod summary;

pub use badge::Badge;
pub use difficulty::{Difficulty, DifficultyError};
pub use mistake::Mistake;
pub use operator::Operator;
pub use question::{OPTION_COUNT, Question};
pub use stats::{OperatorStats, OperatorTally};
pub use summary::{SessionSummary, SessionSummaryError};
