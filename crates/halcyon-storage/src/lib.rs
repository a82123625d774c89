// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite-backed local persistence for the Halcyon client.
//!
//! The client keeps exactly one durable thing on disk: the user identity
//! (generated id plus optional display name). Everything else lives on the
//! backend. [`SqliteIdentityStore`] implements the `IdentityStore` trait
//! from `halcyon-core` over a small key-value table.

pub mod database;
pub mod identity;

pub use database::Database;
pub use identity::SqliteIdentityStore;
