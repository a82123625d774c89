// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the IdentityStore trait.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use halcyon_config::model::StorageConfig;
use halcyon_core::{HalcyonError, Identity, IdentityStore, UserId};

use crate::database::{map_tr_err, Database};

const KEY_USER_ID: &str = "user_id";
const KEY_DISPLAY_NAME: &str = "display_name";

/// SQLite-backed identity store.
///
/// Persists the user identifier and display name as rows in the `state`
/// key-value table. All access goes through the shared [`Database`] handle.
pub struct SqliteIdentityStore {
    db: Database,
}

impl SqliteIdentityStore {
    /// Open the store at the configured database path.
    pub async fn open(config: &StorageConfig) -> Result<Self, HalcyonError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "identity store opened");
        Ok(Self { db })
    }

    /// Wrap an already opened database handle.
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Checkpoint and release the underlying database.
    pub async fn close(&self) -> Result<(), HalcyonError> {
        self.db.close().await
    }

    async fn put(&self, key: &'static str, value: String) -> Result<(), HalcyonError> {
        self.db
            .connection()
            .call(move |conn| -> Result<(), rusqlite::Error> {
                conn.execute(
                    "INSERT INTO state (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    params![key, value],
                )?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)
    }

    async fn get(&self, key: &'static str) -> Result<Option<String>, HalcyonError> {
        self.db
            .connection()
            .call(move |conn| -> Result<Option<String>, rusqlite::Error> {
                conn.query_row(
                    "SELECT value FROM state WHERE key = ?1",
                    params![key],
                    |row| row.get(0),
                )
                .optional()
            })
            .await
            .map_err(map_tr_err)
    }
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn load(&self) -> Result<Option<Identity>, HalcyonError> {
        let Some(user_id) = self.get(KEY_USER_ID).await? else {
            return Ok(None);
        };
        let display_name = self.get(KEY_DISPLAY_NAME).await?;
        Ok(Some(Identity {
            user_id: UserId(user_id),
            display_name,
        }))
    }

    async fn save_user_id(&self, id: &UserId) -> Result<(), HalcyonError> {
        self.put(KEY_USER_ID, id.as_str().to_string()).await
    }

    async fn save_display_name(&self, name: &str) -> Result<(), HalcyonError> {
        self.put(KEY_DISPLAY_NAME, name.to_string()).await
    }
}
