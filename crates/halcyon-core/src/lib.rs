// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Halcyon client.
//!
//! This crate provides the error type, the chat and identity data model, and
//! the identity persistence trait shared by every other crate in the
//! workspace.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::HalcyonError;
pub use traits::IdentityStore;
pub use types::{ChatMessage, Identity, Role, UserId};
