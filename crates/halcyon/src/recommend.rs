// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `halcyon wellness` and `halcyon music` implementations.
//!
//! Both ask the backend for suggestions keyed to the user's recent moods.
//! Failures degrade to a one-line notice; there is nothing actionable the
//! user could do about them from here.

use colored::Colorize;
use halcyon_api::ApiClient;
use halcyon_api::types::{SpotifyRequest, WellnessActivity, WellnessRequest};
use halcyon_config::model::HalcyonConfig;
use halcyon_core::error::HalcyonError;
use halcyon_core::types::Identity;
use tracing::warn;

/// Runs `halcyon wellness [--category C]`.
pub async fn run_wellness(
    config: &HalcyonConfig,
    identity: &Identity,
    category: Option<String>,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    let request = WellnessRequest {
        user_id: identity.user_id.clone(),
        category,
    };

    match api.wellness().recommendations(&request).await {
        Ok(response) if response.recommendations.is_empty() => {
            println!("{}", "no suggestions right now".dimmed());
        }
        Ok(response) => {
            for activity in &response.recommendations {
                println!();
                println!("  {}", activity.title.bold());
                println!("  {}", activity.description);
                if let Some(meta) = meta_line(activity) {
                    println!("  {}", meta.dimmed());
                }
                if !activity.benefits.is_empty() {
                    println!("{}", format!("  helps: {}", activity.benefits.join(", ")).dimmed());
                }
            }
            println!();
        }
        Err(e) => {
            warn!(error = %e, "wellness recommendations unavailable");
            println!("{}", "suggestions unavailable".dimmed());
        }
    }
    Ok(())
}

/// Runs `halcyon music [--query Q]`. Without a query the backend matches
/// tracks to the current mood; with one it searches the catalog.
pub async fn run_music(
    config: &HalcyonConfig,
    identity: &Identity,
    query: Option<String>,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    let request = SpotifyRequest {
        user_id: identity.user_id.clone(),
        mode: if query.is_some() { "search" } else { "auto" }.to_string(),
        query,
    };

    match api.spotify().recommend(&request).await {
        Ok(response) if response.tracks.is_empty() => {
            println!("{}", "no tracks found".dimmed());
        }
        Ok(response) => {
            if let Some(mood) = &response.mood {
                println!("{}", format!("for your {mood} mood:").dimmed());
            }
            for track in &response.tracks {
                println!("  {} - {}", track.name.bold(), track.artist);
                println!("    {}", track.external_url.dimmed());
            }
        }
        Err(e) => {
            warn!(error = %e, "music recommendations unavailable");
            println!("{}", "recommendations unavailable".dimmed());
        }
    }
    Ok(())
}

/// Joins the category, duration, and difficulty tags into one caption.
fn meta_line(activity: &WellnessActivity) -> Option<String> {
    let parts: Vec<&str> = [
        activity.category.as_deref(),
        activity.duration.as_deref(),
        activity.difficulty.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" / "))
    }
}
