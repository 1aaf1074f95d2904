use quiz_core::model::{Difficulty, Mistake, OPTION_COUNT, OperatorStats};

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Constructed but never started.
    #[default]
    Idle,
    Active,
    /// Time ran out or the game was stopped; `start` begins a fresh round.
    Ended,
}

/// Read-only view of a session, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub score: u32,
    pub time_remaining: i32,
    pub difficulty: Difficulty,
    pub streak: u32,
    pub max_streak: u32,
    pub accuracy: u32,
    pub question_text: Option<String>,
    pub options: Option<[i64; OPTION_COUNT]>,
    pub mistakes: Vec<Mistake>,
    pub operator_stats: OperatorStats,
}
