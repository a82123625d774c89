// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `halcyon log`, `history`, `insights`, and `mood` implementations.
//!
//! Everything here reads or writes the backend mood tracker. Only `log`
//! surfaces failures to the user; the read-side commands degrade to a
//! one-line fallback so a dead backend never turns into a stack trace.

use colored::{Color, Colorize};
use halcyon_api::ApiClient;
use halcyon_api::types::{MoodEntry, MoodInsights};
use halcyon_config::model::HalcyonConfig;
use halcyon_core::error::HalcyonError;
use halcyon_core::types::Identity;
use tracing::warn;

const BAR_WIDTH: usize = 20;

/// Runs `halcyon log <mood> --intensity N`.
///
/// This is one of the two commands whose failure reaches the user as an
/// error line and a non-zero exit.
pub async fn run_log(
    config: &HalcyonConfig,
    identity: &Identity,
    mood: &str,
    intensity: u8,
    note: Option<String>,
    triggers: Vec<String>,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    let entry = MoodEntry {
        user_id: identity.user_id.clone(),
        mood: mood.to_string(),
        intensity,
        notes: note,
        triggers: if triggers.is_empty() {
            None
        } else {
            Some(triggers)
        },
    };

    let response = api.mood().log(&entry).await?;

    println!("mood logged: {mood} ({intensity}%)");
    if let Some(id) = &response.entry_id {
        println!("{}", format!("  entry {id}").dimmed());
    }
    if let Some(insights) = &response.insights {
        println!();
        print_insights(insights);
    }
    Ok(())
}

/// Runs `halcyon history [--days N]`: the mood timeline, oldest first.
pub async fn run_history(
    config: &HalcyonConfig,
    identity: &Identity,
    days: Option<u32>,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    let days = days.unwrap_or(config.mood.history_days);

    println!();
    println!("  halcyon history (last {days} days)");
    println!("  {}", "-".repeat(35));

    match api.mood().history(&identity.user_id, days).await {
        Ok(history) if history.history.is_empty() => {
            println!("    {}", "no mood entries in this window".dimmed());
        }
        Ok(history) => {
            for entry in &history.history {
                let label = format!("{:<10}", entry.mood).color(mood_color(&entry.mood));
                println!(
                    "    {}  {} {} ({}%)",
                    date_of(&entry.timestamp),
                    intensity_bar(entry.intensity),
                    label,
                    entry.intensity
                );
                if let Some(notes) = &entry.notes
                    && !notes.is_empty()
                {
                    println!("{}", format!("                {notes}").dimmed());
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "mood history unavailable");
            println!("    {}", "history unavailable".dimmed());
        }
    }
    println!();
    Ok(())
}

/// Runs `halcyon insights`: aggregate stats, the mood distribution, and
/// the most recent transitions.
pub async fn run_insights(
    config: &HalcyonConfig,
    identity: &Identity,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;

    println!();
    println!("  halcyon insights");
    println!("  {}", "-".repeat(35));

    match api.mood().insights(&identity.user_id).await {
        Ok(insights) => {
            print_insights(&insights);
            if let Some(distribution) = &insights.mood_distribution
                && !distribution.is_empty()
            {
                println!();
                println!("    Distribution:");
                let max = distribution.values().copied().max().unwrap_or(0);
                for (mood, count) in distribution {
                    println!(
                        "      {mood:<10} {} {count}",
                        distribution_bar(*count, max)
                    );
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "mood insights unavailable");
            println!("    {}", "insights unavailable".dimmed());
            println!();
            return Ok(());
        }
    }

    // Transitions are supplementary. Losing them does not blank the rest
    // of the report.
    match api
        .mood()
        .transitions(&identity.user_id, config.mood.transitions_limit)
        .await
    {
        Ok(transitions) if !transitions.transitions.is_empty() => {
            println!();
            println!("    Recent shifts:");
            for transition in transitions.transitions.iter().take(10) {
                println!(
                    "      {} -> {}  {}",
                    transition.from_mood,
                    transition.to_mood,
                    date_of(&transition.timestamp).dimmed()
                );
            }
        }
        Ok(_) => {}
        Err(e) => {
            warn!(error = %e, "mood transitions unavailable");
        }
    }
    println!();
    Ok(())
}

/// Runs `halcyon mood`: the current mood snapshot.
pub async fn run_mood(config: &HalcyonConfig, identity: &Identity) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;

    println!();
    println!("  current mood");
    println!("  {}", "-".repeat(35));

    match api.mood().current(&identity.user_id).await {
        Ok(current) => {
            let mood = current.current_mood.as_deref().unwrap_or("Neutral");
            println!("    Mood:      {}", mood.color(mood_color(mood)).bold());

            // Session intensity when known, rolling average otherwise.
            let intensity = current
                .current_intensity
                .map(f64::from)
                .or(current.average_intensity);
            if let Some(intensity) = intensity {
                println!(
                    "    Intensity: {} {:.0}%",
                    intensity_bar(intensity.round() as u8),
                    intensity
                );
            }

            if let Some(transitions) = &current.recent_transitions
                && !transitions.is_empty()
            {
                println!();
                println!("    Recent changes:");
                for transition in transitions.iter().take(3) {
                    println!("      {} -> {}", transition.from_mood, transition.to_mood);
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "current mood unavailable");
            println!("    {}", "current mood unavailable".dimmed());
        }
    }
    println!();
    Ok(())
}

/// Prints the aggregate block shared by `insights` and the post-log
/// confirmation.
fn print_insights(insights: &MoodInsights) {
    if insights.entries_count == 0 {
        let note = insights
            .message
            .as_deref()
            .unwrap_or("no mood entries yet");
        println!("    {}", note.dimmed());
        return;
    }
    println!("    Entries:   {}", insights.entries_count);
    if let Some(most) = &insights.most_common_mood {
        println!("    Most felt: {} ({}x)", most.mood, most.count);
    }
    if let Some(average) = insights.average_intensity {
        println!("    Intensity: {average:.1}% average");
    }
    if let Some(trend) = &insights.trend {
        println!("    Trend:     {trend}");
    }
}

/// A fixed-width `[####----]` gauge for a 0-100 intensity.
///
/// Server values above 100 clamp to a full bar rather than panicking.
fn intensity_bar(intensity: u8) -> String {
    let filled = ((usize::from(intensity) * BAR_WIDTH + 50) / 100).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// A proportional bar for the mood distribution, scaled so the most
/// frequent mood fills the full width. Non-zero counts always show at
/// least one tick.
fn distribution_bar(count: u32, max: u32) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (count as usize * BAR_WIDTH).div_ceil(max as usize);
    "#".repeat(filled.min(BAR_WIDTH))
}

/// The date part of an ISO 8601 timestamp.
fn date_of(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

/// Terminal color for a mood label, bucketed the way the app themes them.
/// Low moods go red, settled moods green, everything keyed-up or unknown
/// stays yellow. Labels are matched as substrings, so "very sad" works.
fn mood_color(mood: &str) -> Color {
    let mood = mood.to_lowercase();
    if ["sad", "depressed", "low"].iter().any(|m| mood.contains(m)) {
        Color::Red
    } else if ["happy", "good", "calm", "stable"]
        .iter()
        .any(|m| mood.contains(m))
    {
        Color::Green
    } else {
        Color::Yellow
    }
}
