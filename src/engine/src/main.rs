use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use std::{env, path::PathBuf};
use tracing::info;

use pairlink::config::GameConfig;
use pairlink::game::Container;
use pairlink::game_generator::GameGenerator;
use pairlink::simulator::play_round;
use pairlink::word_source::FileWordSource;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = GameConfig::from_env();
    let wordlist = env::var("WORDLIST").unwrap_or_else(|_| "wordlist.tsv".to_string());
    let width = env_f64("CONTAINER_WIDTH", 800.0)?;
    let height = env_f64("CONTAINER_HEIGHT", 600.0)?;
    let seed = env::var("SESSION_SEED").unwrap_or_else(|_| "board-sim".to_string());

    info!("Loading word list from {}", wordlist);
    let source = FileWordSource::from_file(PathBuf::from(&wordlist))
        .with_context(|| format!("failed to load word list {}", wordlist))?;
    if source.is_empty() {
        bail!("word list {} has no entries", wordlist);
    }

    let delay = config.animation_delay;
    let generator = GameGenerator::new(source, config);
    let mut session = generator.new_session(&seed, Container::new(width, height))?;
    info!("Dealt board:\n{}", session.board());

    let report = play_round(&mut session, delay).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

fn env_f64(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .with_context(|| format!("invalid {}: {}", key, value)),
        Err(_) => Ok(default),
    }
}
