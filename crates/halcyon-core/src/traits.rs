// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The identity persistence seam.
//!
//! The trait exists so the CLI and tests can run against an in-memory store
//! while the real client persists through SQLite (`halcyon-storage`).

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tracing::warn;

use crate::error::HalcyonError;
use crate::types::{Identity, UserId};

/// Local key-value persistence for the user identity.
///
/// Implementations store exactly two opaque strings: the user identifier
/// and the display name. Nothing else the client touches is durable.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Returns the stored identity, or `None` on a fresh install.
    async fn load(&self) -> Result<Option<Identity>, HalcyonError>;

    /// Persists the user identifier.
    async fn save_user_id(&self, id: &UserId) -> Result<(), HalcyonError>;

    /// Persists the display name.
    async fn save_display_name(&self, name: &str) -> Result<(), HalcyonError>;
}

impl Identity {
    /// Loads the stored identity, generating and persisting a fresh
    /// `user_<unix-millis>` identifier on first launch.
    ///
    /// Never fails: a store that cannot be read or written is logged and the
    /// generated identifier is kept for the session only. Once a value has
    /// been persisted, every subsequent call returns it unchanged.
    pub async fn load_or_create(store: &dyn IdentityStore) -> Identity {
        match store.load().await {
            Ok(Some(identity)) => identity,
            Ok(None) => {
                let identity = Identity::generate();
                if let Err(e) = store.save_user_id(&identity.user_id).await {
                    warn!(error = %e, "failed to persist generated user id, keeping it for this session");
                }
                identity
            }
            Err(e) => {
                warn!(error = %e, "failed to load identity, generating a session-scoped user id");
                Identity::generate()
            }
        }
    }

    /// A fresh, unpersisted identity. Used directly when no store can be
    /// opened at all.
    pub fn generate() -> Identity {
        Identity {
            user_id: generate_user_id(),
            display_name: None,
        }
    }
}

/// Generates a `user_<unix-millis>` identifier.
fn generate_user_id() -> UserId {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    UserId(format!("user_{millis}"))
}
