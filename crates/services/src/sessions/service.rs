use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use std::fmt;

use quiz_core::model::{Difficulty, Mistake, OperatorStats, Question, SessionSummary};
use quiz_core::{GameSettings, QuestionGenerator};

use super::progress::{SessionSnapshot, SessionState};
use crate::error::SessionError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A timed arithmetic round.
///
/// One value is created up front and reused: [`GameSession::start`] resets
/// every counter, the caller drives the clock through [`GameSession::tick`],
/// and each answer goes through [`GameSession::submit_answer`] followed by
/// [`GameSession::advance_question`]. Calls against a session that is not
/// active are no-ops.
///
/// The session does not deduplicate answers; the driver must submit at most
/// one answer per rendered question.
pub struct GameSession<R = StdRng> {
    settings: GameSettings,
    generator: QuestionGenerator<R>,
    state: SessionState,
    score: u32,
    time_remaining: i32,
    difficulty: Difficulty,
    current_question: Option<Question>,
    total_attempts: u32,
    correct_attempts: u32,
    streak: u32,
    max_streak: u32,
    mistakes: Vec<Mistake>,
    operator_stats: OperatorStats,
    recorded: bool,
}

impl GameSession<StdRng> {
    /// Session drawing questions from OS-seeded randomness.
    #[must_use]
    pub fn new(settings: GameSettings) -> Self {
        Self::with_generator(settings, QuestionGenerator::from_os_rng())
    }

    /// Session with a reproducible question sequence.
    #[must_use]
    pub fn seeded(settings: GameSettings, seed: u64) -> Self {
        Self::with_generator(settings, QuestionGenerator::seeded(seed))
    }
}

impl<R: Rng> GameSession<R> {
    #[must_use]
    pub fn with_generator(settings: GameSettings, generator: QuestionGenerator<R>) -> Self {
        let time_remaining = i32::from(settings.round_seconds());
        Self {
            settings,
            generator,
            state: SessionState::Idle,
            score: 0,
            time_remaining,
            difficulty: Difficulty::Easy,
            current_question: None,
            total_attempts: 0,
            correct_attempts: 0,
            streak: 0,
            max_streak: 0,
            mistakes: Vec::new(),
            operator_stats: OperatorStats::new(),
            recorded: false,
        }
    }

    /// Reset every counter, activate the session and generate the first question.
    pub fn start(&mut self) {
        self.score = 0;
        self.time_remaining = i32::from(self.settings.round_seconds());
        self.difficulty = Difficulty::Easy;
        self.total_attempts = 0;
        self.correct_attempts = 0;
        self.streak = 0;
        self.max_streak = 0;
        self.mistakes.clear();
        self.operator_stats = OperatorStats::new();
        self.recorded = false;
        self.state = SessionState::Active;

        tracing::info!(seconds = self.time_remaining, "session started");
        self.current_question = Some(self.next_question());
    }

    /// One second elapsed. Ends the session once time is exhausted.
    pub fn tick(&mut self) -> SessionState {
        if !self.is_active() {
            return self.state;
        }
        self.time_remaining -= 1;
        self.end_if_out_of_time();
        self.state
    }

    /// Score an answer to the current question.
    ///
    /// Returns `false` without touching any state when the session is not active.
    pub fn submit_answer(&mut self, candidate: i64) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(question) = self.current_question.as_ref() else {
            return false;
        };

        let correct = question.is_correct(candidate);
        self.total_attempts = self.total_attempts.saturating_add(1);
        self.operator_stats.record(question.operator(), correct);

        if correct {
            self.correct_attempts = self.correct_attempts.saturating_add(1);
            self.streak = self.streak.saturating_add(1);
            self.max_streak = self.max_streak.max(self.streak);
            self.score = self
                .score
                .saturating_add(self.settings.points_for_streak(self.streak));
            self.time_remaining += i32::from(self.settings.correct_time_bonus());
        } else {
            self.mistakes.push(Mistake::new(question, candidate));
            self.streak = 0;
            self.time_remaining -= i32::from(self.settings.wrong_time_penalty());
        }

        tracing::debug!(
            candidate,
            correct,
            score = self.score,
            streak = self.streak,
            time_remaining = self.time_remaining,
            "answer scored"
        );

        self.end_if_out_of_time();
        correct
    }

    /// Re-derive difficulty from the score and replace the current question.
    pub fn advance_question(&mut self) {
        if !self.is_active() {
            return;
        }
        self.difficulty = self.settings.difficulty_for_score(self.score);
        self.current_question = Some(self.next_question());
    }

    /// Stop the session. Safe to call repeatedly.
    pub fn end(&mut self) {
        if self.state == SessionState::Active {
            self.state = SessionState::Ended;
            tracing::info!(
                score = self.score,
                accuracy = self.accuracy(),
                max_streak = self.max_streak,
                "session ended"
            );
        }
    }

    /// Whole-percent accuracy; `0` before any attempt.
    #[must_use]
    pub fn accuracy(&self) -> u32 {
        quiz_core::model::stats::rounded_percent(self.correct_attempts, self.total_attempts)
    }

    fn next_question(&mut self) -> Question {
        let question = self.generator.generate(self.difficulty);
        tracing::debug!(
            question = %question,
            level = self.difficulty.level(),
            "question generated"
        );
        question
    }

    fn end_if_out_of_time(&mut self) {
        if self.time_remaining <= 0 {
            self.time_remaining = 0;
            self.end();
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn time_remaining(&self) -> i32 {
        self.time_remaining
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current_question.as_ref()
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    #[must_use]
    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn max_streak(&self) -> u32 {
        self.max_streak
    }

    #[must_use]
    pub fn mistakes(&self) -> &[Mistake] {
        &self.mistakes
    }

    #[must_use]
    pub fn operator_stats(&self) -> &OperatorStats {
        &self.operator_stats
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            score: self.score,
            time_remaining: self.time_remaining,
            difficulty: self.difficulty,
            streak: self.streak,
            max_streak: self.max_streak,
            accuracy: self.accuracy(),
            question_text: self.current_question.as_ref().map(Question::display_text),
            options: self.current_question.as_ref().map(|q| *q.options()),
            mistakes: self.mistakes.clone(),
            operator_stats: self.operator_stats.clone(),
        }
    }

    /// Final snapshot for history and achievements.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotStarted` or `SessionError::StillActive` unless the
    /// session has ended, and `SessionError::Summary` if the counters are inconsistent.
    pub fn summary(&self, completed_at: DateTime<Utc>) -> Result<SessionSummary, SessionError> {
        match self.state {
            SessionState::Idle => return Err(SessionError::NotStarted),
            SessionState::Active => return Err(SessionError::StillActive),
            SessionState::Ended => {}
        }
        Ok(SessionSummary::new(
            completed_at,
            self.score,
            self.max_streak,
            self.total_attempts,
            self.correct_attempts,
            self.operator_stats.clone(),
        )?)
    }

    pub(crate) fn is_recorded(&self) -> bool {
        self.recorded
    }

    pub(crate) fn mark_recorded(&mut self) {
        self.recorded = true;
    }
}

impl<R> fmt::Debug for GameSession<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("time_remaining", &self.time_remaining)
            .field("difficulty", &self.difficulty)
            .field("streak", &self.streak)
            .field("total_attempts", &self.total_attempts)
            .field("mistakes_len", &self.mistakes.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
