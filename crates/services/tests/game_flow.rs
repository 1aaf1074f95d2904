use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use quiz_core::GameSettings;
use quiz_core::model::{Badge, SessionSummary};
use quiz_core::time::{fixed_clock, fixed_now};
use services::{GameLoopService, GameSession, SessionError, SessionState};
use storage::{HistoryRepository, InMemoryRepository, Storage, StorageError};

fn wrong_option(session: &GameSession) -> i64 {
    let q = session.current_question().expect("active question");
    *q.options()
        .iter()
        .find(|v| **v != q.correct_answer())
        .expect("three distractors")
}

#[test]
fn correct_then_incorrect_answer_scenario() {
    let mut session = GameSession::seeded(GameSettings::default(), 99);
    session.start();
    assert_eq!(session.time_remaining(), 60);

    let answer = session.current_question().unwrap().correct_answer();
    assert!(session.submit_answer(answer));
    assert_eq!(session.time_remaining(), 62);
    assert_eq!(session.score(), 12);
    assert_eq!(session.streak(), 1);
    session.advance_question();

    let wrong = wrong_option(&session);
    assert!(!session.submit_answer(wrong));
    assert_eq!(session.time_remaining(), 57);
    assert_eq!(session.streak(), 0);
    assert_eq!(session.mistakes().len(), 1);
    assert_eq!(session.mistakes()[0].submitted_answer, wrong);
    assert_eq!(session.score(), 12);
    assert_eq!(session.accuracy(), 50);
    assert_eq!(session.state(), SessionState::Active);
}

#[test]
fn countdown_runs_out_and_freezes_state() {
    let mut session = GameSession::seeded(GameSettings::default(), 7);
    session.start();
    let mut ticks = 0;
    while session.tick() == SessionState::Active {
        ticks += 1;
    }
    assert_eq!(ticks, 59);
    assert_eq!(session.time_remaining(), 0);

    let before = session.snapshot();
    assert!(!session.submit_answer(1));
    session.advance_question();
    assert_eq!(session.snapshot(), before);
}

#[tokio::test]
async fn finishing_records_history_and_badges() {
    let repo = InMemoryRepository::new();
    let loop_svc = GameLoopService::new(fixed_clock(), Arc::new(repo.clone()), Arc::new(repo));

    let mut session = GameSession::seeded(GameSettings::default(), 5);
    session.start();
    for _ in 0..5 {
        let answer = session.current_question().unwrap().correct_answer();
        session.submit_answer(answer);
        session.advance_question();
    }

    let finished = loop_svc.finish(&mut session).await.unwrap();
    assert_eq!(session.state(), SessionState::Ended);
    assert_eq!(finished.summary.completed_at(), fixed_now());
    assert_eq!(finished.summary.score(), 12 + 14 + 16 + 18 + 20);
    assert_eq!(finished.summary.accuracy(), 100);
    assert_eq!(finished.new_badges, vec![Badge::FirstWin, Badge::Perfect]);

    let history = loop_svc.history().await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0], finished.summary);

    let err = loop_svc.finish(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::AlreadyRecorded));

    session.start();
    let wrong = wrong_option(&session);
    session.submit_answer(wrong);
    let second = loop_svc.finish(&mut session).await.unwrap();
    assert!(second.new_badges.is_empty());
    assert_eq!(loop_svc.history().await.unwrap().len(), 2);
    assert_eq!(loop_svc.unlocked_badges().await.unwrap().len(), 2);

    let mastery = loop_svc.mastery().await.unwrap();
    assert_eq!(mastery.games(), 2);
    assert_eq!(mastery.stats().total_attempts(), 6);
    assert_eq!(mastery.stats().total_correct(), 5);
}

#[tokio::test]
async fn finishing_an_unstarted_session_fails() {
    let storage = Storage::in_memory(20);
    let loop_svc = GameLoopService::from_storage(fixed_clock(), &storage);
    let mut session = GameSession::seeded(GameSettings::default(), 1);

    let err = loop_svc.finish(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::NotStarted));
    assert!(loop_svc.history().await.unwrap().is_empty());
}

/// History backend whose first append fails.
struct FlakyHistory {
    inner: InMemoryRepository,
    failed_once: AtomicBool,
}

#[async_trait]
impl HistoryRepository for FlakyHistory {
    async fn append_summary(&self, summary: &SessionSummary) -> Result<(), StorageError> {
        if !self.failed_once.swap(true, Ordering::SeqCst) {
            return Err(StorageError::Connection("disk unavailable".into()));
        }
        self.inner.append_summary(summary).await
    }

    async fn list_history(&self) -> Result<Vec<SessionSummary>, StorageError> {
        self.inner.list_history().await
    }
}

#[tokio::test]
async fn failed_append_can_be_retried() {
    let repo = InMemoryRepository::new();
    let flaky = FlakyHistory {
        inner: repo.clone(),
        failed_once: AtomicBool::new(false),
    };
    let loop_svc = GameLoopService::new(fixed_clock(), Arc::new(flaky), Arc::new(repo.clone()));

    let mut session = GameSession::seeded(GameSettings::default(), 3);
    session.start();
    let answer = session.current_question().unwrap().correct_answer();
    session.submit_answer(answer);

    let err = loop_svc.finish(&mut session).await.unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::Connection(_))));
    assert!(repo.list_history().await.unwrap().is_empty());

    let finished = loop_svc.finish(&mut session).await.unwrap();
    assert_eq!(finished.summary.score(), 12);
    assert_eq!(repo.list_history().await.unwrap().len(), 1);
}
