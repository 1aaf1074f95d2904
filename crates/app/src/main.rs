mod config;
mod driver;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quiz_core::QuestionGenerator;
use services::mastery::{recent_scores, total_xp};
use services::{Clock, FinishedGame, GameLoopService, GameSession};
use storage::Storage;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

const DEFAULT_LOG_FILTER: &str = "mathquiz=info,services=info,quiz_core=warn";

/// Timed arithmetic quiz in the terminal.
#[derive(Debug, Parser)]
#[command(name = "mathquiz", version)]
struct Cli {
    /// TOML file overriding game settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible question sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Round length in seconds
    #[arg(long)]
    seconds: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();
    let settings = config::load(cli.config.as_deref(), cli.seconds)?;
    let generator = match cli.seed {
        Some(seed) => QuestionGenerator::seeded(seed),
        None => QuestionGenerator::from_os_rng(),
    };

    let banner = format!(
        "Answer with 1-4. Correct: +{}s, wrong: -{}s.",
        settings.correct_time_bonus(),
        settings.wrong_time_penalty()
    );
    let storage = Storage::in_memory(settings.history_limit());
    let loop_svc = GameLoopService::from_storage(Clock::default(), &storage);
    let session = Arc::new(Mutex::new(GameSession::with_generator(settings, generator)));
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("{banner}");
        session.lock().await.start();
        driver::play_round(Arc::clone(&session), &mut input).await?;

        let finished = {
            let mut guard = session.lock().await;
            let finished = loop_svc.finish(&mut *guard).await?;
            print_results(&guard, &finished);
            finished
        };
        tracing::debug!(score = finished.summary.score(), "round recorded");
        print_progress(&loop_svc).await?;

        if !ask_again(&mut input).await? {
            break;
        }
    }

    Ok(())
}

fn print_results(session: &GameSession, finished: &FinishedGame) {
    let summary = &finished.summary;
    println!();
    println!("Time's up!");
    println!(
        "Score {}  accuracy {}%  best streak {}",
        summary.score(),
        summary.accuracy(),
        summary.max_streak()
    );

    if !session.mistakes().is_empty() {
        println!("Review:");
        for mistake in session.mistakes() {
            println!(
                "  {} = ?   you: {}  answer: {}",
                mistake.question_text, mistake.submitted_answer, mistake.correct_answer
            );
        }
    }

    for badge in &finished.new_badges {
        println!("Badge unlocked: {} ({})", badge.title(), badge.description());
    }
}

async fn print_progress(loop_svc: &GameLoopService) -> anyhow::Result<()> {
    let history = loop_svc.history().await.context("loading history")?;
    println!(
        "Total XP {}  recent scores {:?}",
        total_xp(&history),
        recent_scores(&history, 10)
    );

    let mastery = loop_svc.mastery().await.context("loading mastery")?;
    for line in mastery.practiced() {
        println!(
            "  {:<15} {:>3}%  ({}/{})",
            line.operator.label(),
            line.accuracy,
            line.correct,
            line.attempts
        );
    }
    Ok(())
}

async fn ask_again<B>(input: &mut Lines<B>) -> anyhow::Result<bool>
where
    B: AsyncBufRead + Unpin,
{
    println!("Play again? [y/N]");
    let line = input.next_line().await.context("reading reply")?;
    Ok(matches!(
        line.as_deref().map(str::trim),
        Some("y" | "Y" | "yes")
    ))
}
