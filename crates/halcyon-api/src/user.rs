// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User profile endpoints.

use halcyon_core::{HalcyonError, UserId};

use crate::client::ApiClient;
use crate::types::{ProfileResponse, UpdateProfileRequest, UpdateProfileResponse};

/// Client for `/api/user` operations.
#[derive(Clone, Copy)]
pub struct UserApi<'a> {
    api: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Loads the profile and usage stats for a user.
    pub async fn profile(&self, user_id: &UserId) -> Result<ProfileResponse, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!("/api/user/profile/{}", user_id.as_str())));
        self.api.execute(builder, "user profile").await
    }

    /// Updates the profile via `POST /api/user/profile`.
    pub async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
    ) -> Result<UpdateProfileResponse, HalcyonError> {
        let builder = self
            .api
            .http()
            .post(self.api.url("/api/user/profile"))
            .json(request);
        self.api.execute(builder, "profile update").await
    }
}
