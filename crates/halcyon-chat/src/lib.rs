// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat delivery for the Halcyon client.
//!
//! Prefers a persistent duplex channel keyed by user id and degrades to
//! request/response when the channel cannot be opened or errors. See
//! [`transport::ChatTransport`] for the lifecycle.

pub mod transport;

pub use transport::{ChatEvent, ChatTransport, SendOutcome};
