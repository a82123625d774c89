// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `halcyon profile` command implementation.
//!
//! Shows the backend profile with usage stats, or updates the display name
//! when `--name` is given. The name is persisted both server-side and in
//! the local identity store so a later offline launch still greets the
//! user correctly.

use colored::Colorize;
use halcyon_api::ApiClient;
use halcyon_api::types::UpdateProfileRequest;
use halcyon_config::model::HalcyonConfig;
use halcyon_core::error::HalcyonError;
use halcyon_core::traits::IdentityStore;
use halcyon_core::types::Identity;
use halcyon_storage::SqliteIdentityStore;
use tracing::warn;

/// Runs `halcyon profile [--name NEW]`.
///
/// The update path is the second of the two commands whose failure reaches
/// the user as an error line and a non-zero exit. The show path degrades
/// to the locally stored identity when the backend is unreachable.
pub async fn run_profile(
    config: &HalcyonConfig,
    identity: &Identity,
    store: Option<&SqliteIdentityStore>,
    name: Option<String>,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;

    if let Some(name) = name {
        let request = UpdateProfileRequest {
            user_id: identity.user_id.clone(),
            name: Some(name.clone()),
            preferences: None,
        };
        api.user().update_profile(&request).await?;

        // The local copy keeps greetings working offline. Losing it is
        // not worth failing an update the server already accepted.
        if let Some(store) = store
            && let Err(e) = store.save_display_name(&name).await
        {
            warn!(error = %e, "display name updated on the server but not stored locally");
        }
        println!("profile updated: {name}");
        return Ok(());
    }

    println!();
    println!("  halcyon profile");
    println!("  {}", "-".repeat(35));

    match api.user().profile(&identity.user_id).await {
        Ok(response) => {
            let name = response
                .profile
                .name
                .as_deref()
                .or(identity.display_name.as_deref())
                .unwrap_or("anonymous");
            println!("    Name:     {}", name.bold());
            println!("    User id:  {}", response.user_id);
            println!("    Messages: {}", response.stats.total_messages);
            println!("    Moods:    {}", response.stats.mood_entries);
            println!("    Days:     {}", response.stats.days_active);
        }
        Err(e) => {
            warn!(error = %e, "backend profile unavailable, showing the local identity");
            let name = identity.display_name.as_deref().unwrap_or("anonymous");
            println!("    Name:     {}", name.bold());
            println!("    User id:  {}", identity.user_id);
            println!("    {}", "stats unavailable".dimmed());
        }
    }
    println!();
    Ok(())
}
