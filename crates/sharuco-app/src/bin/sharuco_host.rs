//! Demo host for the headless profile view.
//!
//! Loads profiles and snippets from a JSON fixture into the in-memory stores,
//! opens the view for `--key` and prints every `ViewUpdate` as one JSON line.
//! Exits once the view settles, or after `--watch-ms` when that is set.
//!
//! Fixture format:
//! ```json
//! { "profiles": [UserProfile, ...], "snippets": [CodeSnippet, ...] }
//! ```
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use sharuco_app::{ProfileView, ProfileViewConfig, ViewUpdate};
use sharuco_core::config::{read_config_file, SharucoConfig};
use sharuco_core::{CodeSnippet, UserProfile};
use sharuco_effects::{MemoryProfileStore, MemorySnippetStore};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sharuco-host", about = "Render a public profile view from a fixture")]
struct Args {
    /// JSON fixture with `profiles` and `snippets`
    #[arg(long)]
    fixture: PathBuf,

    /// Profile key to open; omit to open without a key
    #[arg(long)]
    key: Option<String>,

    /// Configuration file (.toml or .json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep printing updates for this long instead of exiting once settled
    #[arg(long)]
    watch_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Fixture {
    profiles: Vec<UserProfile>,
    snippets: Vec<CodeSnippet>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ProfileViewConfig::load_from_file(path)?,
        None => ProfileViewConfig::default(),
    };
    config.merge_with_env()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let fixture: Fixture = read_config_file(&args.fixture)
        .with_context(|| format!("loading fixture {}", args.fixture.display()))?;
    tracing::info!(
        profiles = fixture.profiles.len(),
        snippets = fixture.snippets.len(),
        "fixture loaded"
    );

    let profiles = Arc::new(MemoryProfileStore::with_profiles(fixture.profiles));
    let snippets = Arc::new(MemorySnippetStore::with_snippets(fixture.snippets));
    let mut view = ProfileView::new(profiles, snippets, &config);
    let mut updates = view.subscribe();

    view.open(args.key.as_deref()).await;
    emit(&updates.borrow_and_update())?;

    match args.watch_ms {
        Some(ms) => {
            let watching = follow(&mut updates, |_| false);
            if let Ok(result) = tokio::time::timeout(Duration::from_millis(ms), watching).await {
                result?;
            }
        }
        None => {
            let settled = updates.borrow().state.is_settled();
            if !settled {
                follow(&mut updates, |update| update.state.is_settled()).await?;
            }
        }
    }

    view.close().await;
    Ok(())
}

/// Print updates until `done` returns true or the view goes away.
async fn follow(
    updates: &mut watch::Receiver<ViewUpdate>,
    mut done: impl FnMut(&ViewUpdate) -> bool,
) -> Result<()> {
    while updates.changed().await.is_ok() {
        let update = updates.borrow_and_update().clone();
        emit(&update)?;
        if done(&update) {
            break;
        }
    }
    Ok(())
}

fn emit(update: &ViewUpdate) -> Result<()> {
    println!("{}", serde_json::to_string(update)?);
    if let Some(notice) = update.state.notice() {
        tracing::info!(epoch = update.epoch, state = update.state.label(), notice);
    }
    Ok(())
}
