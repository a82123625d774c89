// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wellness endpoints: tailored recommendations and the activity catalog.

use halcyon_core::HalcyonError;

use crate::client::ApiClient;
use crate::types::{WellnessCatalog, WellnessRecommendations, WellnessRequest};

/// Client for `/api/wellness` operations.
#[derive(Clone, Copy)]
pub struct WellnessApi<'a> {
    api: &'a ApiClient,
}

impl<'a> WellnessApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Requests recommendations, optionally restricted to one category.
    pub async fn recommendations(
        &self,
        request: &WellnessRequest,
    ) -> Result<WellnessRecommendations, HalcyonError> {
        let builder = self
            .api
            .http()
            .post(self.api.url("/api/wellness/recommendations"))
            .json(request);
        self.api.execute(builder, "wellness recommendations").await
    }

    /// Loads the full activity catalog, keyed by category.
    pub async fn activities(&self) -> Result<WellnessCatalog, HalcyonError> {
        let builder = self.api.http().get(self.api.url("/api/wellness/activities"));
        self.api.execute(builder, "wellness activities").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_config::model::ServerConfig;
    use halcyon_core::UserId;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(&ServerConfig {
            base_url: base_url.to_string(),
            ..ServerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn recommendations_posts_category_when_set() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/wellness/recommendations"))
            .and(body_json(serde_json::json!({
                "user_id": "user_3",
                "category": "breathing"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "user_3",
                "recommendations": [
                    {
                        "name": "4-7-8 Breathing",
                        "description": "Breathe in for 4 seconds, hold for 7, exhale for 8",
                        "duration": "5 minutes",
                        "difficulty": "easy",
                        "benefits": ["reduces anxiety", "promotes calm"]
                    }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let recs = client
            .wellness()
            .recommendations(&WellnessRequest {
                user_id: UserId("user_3".into()),
                category: Some("breathing".into()),
            })
            .await
            .unwrap();

        assert_eq!(recs.recommendations.len(), 1);
        assert_eq!(recs.recommendations[0].title, "4-7-8 Breathing");
        assert_eq!(recs.recommendations[0].benefits.len(), 2);
    }

    #[tokio::test]
    async fn recommendations_omit_category_when_unset() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/wellness/recommendations"))
            .and(body_json(serde_json::json!({"user_id": "user_3"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "user_3",
                "recommendations": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let recs = client
            .wellness()
            .recommendations(&WellnessRequest {
                user_id: UserId("user_3".into()),
                category: None,
            })
            .await
            .unwrap();
        assert!(recs.recommendations.is_empty());
    }

    #[tokio::test]
    async fn activities_decode_category_map() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/wellness/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "activities": {
                    "breathing": [
                        {"name": "Box Breathing", "description": "4-4-4-4", "duration": "5-10 minutes", "difficulty": "easy"}
                    ],
                    "physical": [
                        {"name": "Short Walk", "description": "10 minutes outside", "duration": "10-20 minutes", "difficulty": "easy"}
                    ]
                }
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let catalog = client.wellness().activities().await.unwrap();

        assert_eq!(catalog.activities.len(), 2);
        assert_eq!(catalog.activities["breathing"][0].title, "Box Breathing");
        assert_eq!(catalog.activities["physical"][0].title, "Short Walk");
    }
}
