mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use game_core::{InputSnapshot, MatchEngine};
use tracing::info;

use crate::config::RunnerConfig;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> Result<()> {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = RunnerConfig::load(path.as_deref())?;

    println!("{}", config.keys.instructions());

    let mut engine = MatchEngine::new(config.game(), config.seed, 0)
        .context("invalid game configuration")?;

    info!(
        ticks = config.ticks,
        frame_ms = config.frame_ms,
        "match started"
    );

    // Nobody holds a key, so both paddles stay with the AI
    let input = InputSnapshot::new();
    let mut now_ms = 0;
    for _ in 0..config.ticks {
        now_ms += config.frame_ms;
        if let Some(update) = engine.tick(&input, now_ms).scored {
            info!(
                scorer = ?update.scorer,
                "{} - {}    {} | {}",
                update.score.player1,
                update.score.player2,
                update.controls[0],
                update.controls[1]
            );
        }
    }

    let score = engine.score();
    let [p1, p2] = engine.controls();
    info!(
        player1 = score.player1,
        player2 = score.player2,
        elapsed_ms = now_ms,
        "match finished"
    );
    println!(
        "Final score {} - {} ({} | {})",
        score.player1, score.player2, p1, p2
    );

    Ok(())
}
