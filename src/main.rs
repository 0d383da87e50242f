//! Geratrix - unified CLI
//!
//! Plays matches in the terminal, runs bot simulations and prints the rules.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use geratrix::{
    ConfigOverrides, GameEvent, InputEvent, Match, RULES, Seat, load_config, parse_line,
    simulate,
};
use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            difficulty,
            two_players,
            seed,
        } => {
            let seats = two_players.then_some([Seat::Human, Seat::Human]);
            let overrides = ConfigOverrides {
                difficulty,
                seats,
                seed,
                bot_delay_ms: None,
            };
            run_play(config, overrides).await
        }
        Command::Simulate {
            config,
            difficulty,
            matches,
            seed,
            json,
        } => run_simulate(config, difficulty, matches, seed, json),
        Command::Rules => {
            for line in RULES {
                println!("{}", line);
            }
            Ok(())
        }
    }
}

/// Play a match on stdin/stdout
#[instrument(skip_all, fields(config_path = %config.display()))]
async fn run_play(config: PathBuf, overrides: ConfigOverrides) -> Result<()> {
    // Setup logging to file to avoid interfering with the board
    let log_file = std::fs::File::create("geratrix.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,geratrix=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let config = overrides.apply(load_config(&config)?);
    info!(difficulty = %config.difficulty(), "Starting match");

    for line in RULES {
        println!("{}", line);
    }
    println!();

    let (input_tx, input_rx) = mpsc::unbounded_channel::<InputEvent>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<GameEvent>();

    // Stdin blocks, so it gets its own thread
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            match parse_line(&line) {
                Ok(event) => {
                    if input_tx.send(event).is_err() {
                        break;
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
    });

    let ui = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                GameEvent::StateChanged(screen) => println!("{}", screen),
                GameEvent::BotThinking(_) => {}
                GameEvent::RoundOver { result, score } => {
                    println!("{} ({} - {})", result, score.0, score.1);
                }
                GameEvent::MatchOver { announcement, .. } => {
                    if let Some(text) = announcement {
                        println!("\n*** {} ***", text);
                    }
                }
            }
        }
    });

    let game = geratrix::Orchestrator::new(Match::new(config), input_rx, event_tx)
        .run()
        .await?;
    if let Err(e) = ui.await {
        warn!(error = %e, "UI task failed");
    }

    info!(status = ?game.status(), score = ?game.score().as_tuple(), "Match ended");
    Ok(())
}

/// Run bot-vs-bot simulations
#[instrument]
fn run_simulate(
    config: PathBuf,
    difficulty: Option<geratrix::Difficulty>,
    matches: u32,
    seed: u64,
    json: bool,
) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn,geratrix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let overrides = ConfigOverrides {
        difficulty,
        ..ConfigOverrides::default()
    };
    let config = overrides.apply(load_config(&config)?);
    let report = simulate(&config, matches, seed);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Difficulty:    {}", config.difficulty());
        println!("{}", report);
    }
    Ok(())
}
