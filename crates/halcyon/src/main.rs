// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Halcyon - a mood-aware support chat for your terminal.
//!
//! This is the binary entry point for the Halcyon client.

mod chat;
mod mood;
mod profile;
mod recommend;
mod status;

use clap::{Parser, Subcommand};
use colored::Colorize;
use halcyon_core::types::Identity;
use halcyon_storage::SqliteIdentityStore;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Halcyon - a mood-aware support chat for your terminal.
#[derive(Parser, Debug)]
#[command(name = "halcyon", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive chat session (the default).
    Chat {
        /// Clear the server-side chat history instead of chatting.
        #[arg(long)]
        clear: bool,
    },
    /// Log a mood entry.
    Log {
        /// Mood label, e.g. happy, sad, anxious, calm.
        mood: String,
        /// Intensity from 0 to 100.
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        intensity: u8,
        /// Free-form note attached to the entry.
        #[arg(long)]
        note: Option<String>,
        /// Trigger tag; repeat the flag for several.
        #[arg(long = "trigger")]
        triggers: Vec<String>,
    },
    /// Show the mood timeline.
    History {
        /// How many days to look back.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Show mood analytics and recent transitions.
    Insights,
    /// Show the current mood snapshot.
    Mood,
    /// Show or update the user profile.
    Profile {
        /// Set a new display name.
        #[arg(long)]
        name: Option<String>,
    },
    /// Suggest wellness activities.
    Wellness {
        /// Restrict suggestions to one category.
        #[arg(long)]
        category: Option<String>,
    },
    /// Suggest music for the current mood.
    Music {
        /// Search the catalog instead of matching the current mood.
        #[arg(long)]
        query: Option<String>,
    },
    /// Check backend connectivity and the local identity.
    Status {
        /// Print machine-readable JSON.
        #[arg(long)]
        json: bool,
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "halcyon={log_level},halcyon_core={log_level},halcyon_api={log_level},halcyon_chat={log_level},halcyon_storage={log_level},warn"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match halcyon_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            halcyon_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log.level);

    // The identity is resolved once per invocation. A store that cannot be
    // opened leaves us with a session-scoped generated id, never a failure.
    let store = match SqliteIdentityStore::open(&config.storage).await {
        Ok(store) => Some(store),
        Err(e) => {
            warn!(error = %e, path = %config.storage.database_path, "cannot open identity store, using a session-scoped identity");
            None
        }
    };
    let identity = match &store {
        Some(store) => Identity::load_or_create(store).await,
        None => Identity::generate(),
    };
    debug!(user_id = %identity.user_id, "identity resolved");

    let result = match cli.command {
        Some(Commands::Chat { clear: true }) => chat::run_clear(&config, &identity).await,
        Some(Commands::Chat { clear: false }) | None => chat::run_chat(&config, &identity).await,
        Some(Commands::Log {
            mood,
            intensity,
            note,
            triggers,
        }) => mood::run_log(&config, &identity, &mood, intensity, note, triggers).await,
        Some(Commands::History { days }) => mood::run_history(&config, &identity, days).await,
        Some(Commands::Insights) => mood::run_insights(&config, &identity).await,
        Some(Commands::Mood) => mood::run_mood(&config, &identity).await,
        Some(Commands::Profile { name }) => {
            profile::run_profile(&config, &identity, store.as_ref(), name).await
        }
        Some(Commands::Wellness { category }) => {
            recommend::run_wellness(&config, &identity, category).await
        }
        Some(Commands::Music { query }) => recommend::run_music(&config, &identity, query).await,
        Some(Commands::Status { json, plain }) => {
            status::run_status(&config, &identity, json, plain).await
        }
    };

    if let Some(store) = &store
        && let Err(e) = store.close().await
    {
        debug!(error = %e, "identity store close failed");
    }

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
