// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Halcyon integration tests.
//!
//! Provides scripted services and harness infrastructure for fast,
//! deterministic, CI-runnable tests without a live backend.
//!
//! # Components
//!
//! - [`MockBackend`] - Canned REST backend with one stub helper per route
//! - [`DuplexServer`] - Scripted WebSocket endpoint with frame capture
//! - [`TestHarness`] - Full client stack on temp storage

pub mod backend;
pub mod duplex;
pub mod harness;

pub use backend::MockBackend;
pub use duplex::DuplexServer;
pub use harness::TestHarness;
