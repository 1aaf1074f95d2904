use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use quiz_core::model::{OPTION_COUNT, Question};
use services::{GameSession, SessionSnapshot, SessionState};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;

pub type SharedSession = Arc<Mutex<GameSession>>;

/// Calls `tick` once per second until the session stops being active.
pub fn spawn_countdown(session: SharedSession) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if session.lock().await.tick() != SessionState::Active {
                break;
            }
        }
    })
}

/// Map typed input to an option value.
///
/// `1`-`4` pick by position; any other integer must equal one of the options.
#[must_use]
pub fn resolve_choice(input: &str, options: &[i64; OPTION_COUNT]) -> Option<i64> {
    let input = input.trim();
    if let Ok(position) = input.parse::<usize>() {
        if (1..=OPTION_COUNT).contains(&position) {
            return Some(options[position - 1]);
        }
    }
    let value = input.parse::<i64>().ok()?;
    options.contains(&value).then_some(value)
}

fn format_clock(seconds: i32) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[must_use]
pub fn render(snapshot: &SessionSnapshot) -> String {
    let mut out = format!(
        "[{}] score {}  {}",
        format_clock(snapshot.time_remaining),
        snapshot.score,
        snapshot.difficulty
    );
    if snapshot.streak > 1 {
        out.push_str(&format!("  streak {}", snapshot.streak));
    }
    if let Some(text) = &snapshot.question_text {
        out.push_str(&format!("\n  {text}\n"));
    }
    if let Some(options) = &snapshot.options {
        let line: Vec<String> = options
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}) {v}", i + 1))
            .collect();
        out.push_str(&format!("  {}", line.join("   ")));
    }
    out
}

/// How long input stays locked after an answer is scored.
pub const ANSWER_LOCK: Duration = Duration::from_millis(800);

/// What happened to one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Correct,
    Wrong,
    Unreadable,
    /// The round ended before the line could be scored.
    RoundOver,
}

/// Score `line` against the question that was on screen and move on.
pub fn answer(session: &mut GameSession, rendered: &Question, line: &str) -> Answer {
    if !session.is_active() {
        return Answer::RoundOver;
    }
    let Some(choice) = resolve_choice(line, rendered.options()) else {
        return Answer::Unreadable;
    };
    let outcome = if session.submit_answer(choice) {
        Answer::Correct
    } else {
        Answer::Wrong
    };
    session.advance_question();
    outcome
}

/// Run one round until time runs out or input closes.
///
/// After an answer is scored, input is locked for [`ANSWER_LOCK`]: lines read
/// during the lock (typed ahead or buffered in a burst) are dropped, so at
/// most one answer reaches the session per rendered question.
pub async fn play_round<B>(session: SharedSession, input: &mut Lines<B>) -> anyhow::Result<()>
where
    B: AsyncBufRead + Unpin,
{
    let mut countdown = spawn_countdown(Arc::clone(&session));
    let mut locked_until: Option<Instant> = None;

    'round: loop {
        let rendered: Question = {
            let guard = session.lock().await;
            let Some(question) = guard.current_question().filter(|_| guard.is_active()) else {
                break;
            };
            println!("{}", render(&guard.snapshot()));
            question.clone()
        };

        loop {
            let line = tokio::select! {
                _ = &mut countdown => break 'round,
                line = input.next_line() => line.context("reading answer")?,
            };
            let Some(line) = line else {
                session.lock().await.end();
                break 'round;
            };
            if locked_until.is_some_and(|until| Instant::now() < until) {
                tracing::debug!("input dropped while answer lock is held");
                continue;
            }

            match answer(&mut *session.lock().await, &rendered, &line) {
                Answer::Correct => println!("  Great job!"),
                Answer::Wrong => {
                    println!("  Oops! {} = {}", rendered.prompt(), rendered.correct_answer());
                }
                Answer::Unreadable => {
                    println!("  pick 1-{OPTION_COUNT} or type one of the shown values");
                    continue;
                }
                Answer::RoundOver => break 'round,
            }
            locked_until = Some(Instant::now() + ANSWER_LOCK);
            continue 'round;
        }
    }

    countdown.abort();
    Ok(())
}
