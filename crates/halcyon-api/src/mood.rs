// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mood endpoints: logging, history, insights, transitions, current state.

use halcyon_core::{HalcyonError, UserId};

use crate::client::ApiClient;
use crate::types::{
    CurrentMood, LogMoodResponse, MoodEntry, MoodHistory, MoodInsights, MoodTransitions,
};

/// Client for `/api/mood` operations.
#[derive(Clone, Copy)]
pub struct MoodApi<'a> {
    api: &'a ApiClient,
}

impl<'a> MoodApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Logs one mood entry via `POST /api/mood/log`.
    ///
    /// The entry passes through unvalidated: the mood taxonomy and the
    /// intensity range belong to the backend.
    pub async fn log(&self, entry: &MoodEntry) -> Result<LogMoodResponse, HalcyonError> {
        let builder = self
            .api
            .http()
            .post(self.api.url("/api/mood/log"))
            .json(entry);
        self.api.execute(builder, "mood log").await
    }

    /// Loads the mood timeline for the last `days` days.
    pub async fn history(&self, user_id: &UserId, days: u32) -> Result<MoodHistory, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!("/api/mood/history/{}", user_id.as_str())))
            .query(&[("days", days)]);
        self.api.execute(builder, "mood history").await
    }

    /// Loads aggregated insights (counts, trend, distribution).
    pub async fn insights(&self, user_id: &UserId) -> Result<MoodInsights, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!("/api/mood/insights/{}", user_id.as_str())));
        self.api.execute(builder, "mood insights").await
    }

    /// Loads recent mood transitions.
    pub async fn transitions(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<MoodTransitions, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!(
                "/api/mood/transitions/{}",
                user_id.as_str()
            )))
            .query(&[("limit", limit)]);
        self.api.execute(builder, "mood transitions").await
    }

    /// Loads the current mood snapshot for the mood bar view.
    pub async fn current(&self, user_id: &UserId) -> Result<CurrentMood, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!("/api/mood/current/{}", user_id.as_str())));
        self.api.execute(builder, "mood current").await
    }
}
