//! Scripted Treesh session runner.
//!
//! Drives the demo data service and the story actor through a typical session:
//! swiping, opening matched chats with their PINs, messaging, settings and
//! stories. Everything is in memory and lost on exit.

mod config;
mod logging;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use ctrlc::set_handler;
use log::info;
use pico_args::Arguments;
use treesh::{
    Clock, DataService, DemoService, ErrorKind, StdRandom, SystemClock,
    settings::{AppUpdate, SettingsUpdate, Theme},
    stories::{self, ReactionKind, StoryActor, StoryDraft, StoryUser, TextOverlay},
};

use config::DemoConfig;

const HELP: &str = "\
Run a scripted Treesh session against the in-memory demo service

USAGE:
  treesh_demo [OPTIONS]

OPTIONS:
  --seed       N           Seed for match draws and PINs  [default: env TREESH_DEMO_SEED or OS entropy]
  --swipes     N           Number of candidates to swipe  [default: env TREESH_DEMO_SWIPES or 5]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  RUST_LOG                               Log filter (e.g., debug)
  TREESH_LIKE_MATCH_PROBABILITY          Chance that a like matches
  TREESH_SUPER_LIKE_MATCH_PROBABILITY    Chance that a super like matches
  TREESH_API_DELAY_MIN_MS                Minimum simulated latency
  TREESH_API_DELAY_MAX_MS                Maximum simulated latency
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let seed: Option<u64> = pargs.opt_value_from_str("--seed")?;
    let swipes: Option<usize> = pargs.opt_value_from_str("--swipes")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = DemoConfig::from_env(seed, swipes)?;
    info!(
        "Starting demo session ({} swipes, seed {:?})",
        config.swipes, config.seed
    );

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let match_rng = match config.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let service = DemoService::builder(config.engine.clone())
        .clock(clock.clone())
        .match_rng(Box::new(match_rng))
        .build();

    run_arcade(&service, config.swipes).await?;
    run_chats(&service, Duration::from_millis(config.engine.chat.reply_delay_ms)).await?;
    run_settings(&service).await?;
    run_stories(&config, clock).await?;

    info!("Demo session finished");
    Ok(())
}

async fn run_arcade(service: &DemoService, swipes: usize) -> Result<(), Error> {
    let candidates = service.potential_matches().await?;
    info!("{} candidates available", candidates.len());

    for (i, candidate) in candidates.iter().take(swipes).enumerate() {
        let response = if i % 3 == 2 {
            service.super_like(&candidate.id).await?
        } else {
            service.like(&candidate.id).await?
        };

        if response.matched {
            info!("It's a match with {}!", candidate.name);
        } else {
            info!("No match with {}", candidate.name);
        }
    }

    if service.potential_matches().await?.is_empty() {
        info!("No more candidates");
    }

    let stats = service.stats().await?;
    info!(
        "Stats: {} likes, {} super likes, {} matches",
        stats.total_likes, stats.total_super_likes, stats.total_matches
    );
    Ok(())
}

async fn run_chats(service: &DemoService, reply_delay: Duration) -> Result<(), Error> {
    let chats = service.chats().await?;
    if chats.is_empty() {
        info!("No matches to chat with; rerun with another --seed");
        return Ok(());
    }

    for chat in &chats {
        let match_id = chat.match_id;
        let wrong_pin = "0000";
        if let Err(err) = service.chat(match_id, wrong_pin).await {
            if err.kind() == ErrorKind::Auth {
                logging::log_security_event(
                    "pin_rejected",
                    Some(&match_id.to_string()),
                    &err.to_string(),
                );
            }
            info!("{}", err.client_message());
        }

        let pin = service.chat_pin(match_id).await?;
        let thread = service.chat(match_id, &pin).await?;
        info!(
            "Unlocked chat with {} ({} messages)",
            chat.candidate_name,
            thread.len()
        );

        service
            .send_message(match_id, &format!("Hi {}!", chat.candidate_name), &pin)
            .await?;
    }

    tokio::time::sleep(reply_delay).await;

    for chat in service.chats().await? {
        info!(
            "{}: \"{}\" ({} unread)",
            chat.candidate_name,
            chat.last_message.unwrap_or_default(),
            chat.unread_count
        );
    }
    Ok(())
}

async fn run_settings(service: &DemoService) -> Result<(), Error> {
    service
        .update_settings(SettingsUpdate::App(AppUpdate::Theme(Theme::Dark)))
        .await?;
    let exported = service.export_settings().await?;
    info!("Exported settings ({} bytes)", exported.len());
    Ok(())
}

async fn run_stories(config: &DemoConfig, clock: Arc<dyn Clock>) -> Result<(), Error> {
    let handle = StoryActor::spawn(&config.engine.stories, clock.clone())?;

    let draft = StoryDraft::new("/stories/sunset.jpg").with_text(TextOverlay {
        text: "Beautiful day!".to_string(),
        x: 50.0,
        y: 100.0,
        font_size: 24.0,
        color: "#FFFFFF".to_string(),
        font_family: "Inter".to_string(),
    });
    let story = handle.create(draft).await?;

    let viewer = StoryUser {
        id: "3".to_string(),
        name: "Sarah Johnson".to_string(),
        username: "sarahj".to_string(),
    };
    handle.view(story.id, viewer.clone(), true).await?;
    handle.react(story.id, viewer, ReactionKind::Heart).await?;
    handle.toggle_like(story.id).await?;

    let insights = handle.insights(story.id).await?;
    let now = clock.now();
    info!(
        "Story {}: {} views, {} likes, {} left ({:.1}% elapsed)",
        story.id,
        insights.views,
        insights.likes,
        stories::time_remaining(&story, now),
        stories::progress_percent(&story, now)
    );

    handle.shutdown().await?;
    Ok(())
}
