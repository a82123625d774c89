// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed REST clients for the Halcyon backend.
//!
//! One [`ApiClient`] per process owns the connection pool and error mapping;
//! [`ApiClient::chat`], [`ApiClient::mood`], [`ApiClient::user`],
//! [`ApiClient::wellness`] and [`ApiClient::spotify`] hand out borrow-cheap
//! resource clients. Requests map parameters straight onto the wire (path
//! segment, query string, JSON body) with no local validation, no retries
//! and no caching.

pub mod chat;
pub mod client;
pub mod mood;
pub mod spotify;
pub mod types;
pub mod user;
pub mod wellness;

pub use client::ApiClient;
pub use types::{
    ChatHistory, ChatReply, ChatRequest, CurrentMood, HealthResponse, LogMoodResponse, MoodEntry,
    MoodHistory, MoodInsights, MoodTransitions, ProfileResponse, SpotifyRecommendation,
    SpotifyRequest, UpdateProfileRequest, UpdateProfileResponse, WellnessCatalog,
    WellnessRecommendations, WellnessRequest,
};
