// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Music recommendation endpoint.

use halcyon_core::HalcyonError;

use crate::client::ApiClient;
use crate::types::{SpotifyRecommendation, SpotifyRequest};

/// Client for `/api/spotify` operations.
#[derive(Clone, Copy)]
pub struct SpotifyApi<'a> {
    api: &'a ApiClient,
}

impl<'a> SpotifyApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Requests track recommendations.
    ///
    /// Auto mode derives tracks from the user's current mood; search mode
    /// forwards the query string.
    pub async fn recommend(
        &self,
        request: &SpotifyRequest,
    ) -> Result<SpotifyRecommendation, HalcyonError> {
        let builder = self
            .api
            .http()
            .post(self.api.url("/api/spotify/recommend"))
            .json(request);
        self.api.execute(builder, "spotify recommend").await
    }
}
