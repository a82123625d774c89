// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request and response types for the Halcyon backend REST surface.
//!
//! Response structs lean on `#[serde(default)]` for fields the backend only
//! sometimes sends; unknown fields are ignored so the client keeps working
//! when the server grows new ones.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use halcyon_core::{ChatMessage, UserId};

// --- Chat types ---

/// Body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Stable client-generated user identifier.
    pub user_id: UserId,

    /// The user's free-text message, passed through verbatim.
    pub message: String,

    /// Server-issued session identifier, echoed back once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// An assistant reply, as returned by `POST /api/chat` and as carried in
/// each duplex frame. The duplex frames omit `session_id`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// The assistant's reply text.
    pub response: String,

    /// Session identifier, when the REST endpoint issued one.
    #[serde(default)]
    pub session_id: Option<String>,

    /// Mood label the backend detected in the user's message.
    #[serde(default)]
    pub mood_detected: Option<String>,

    /// Detected mood intensity on the 0-100 scale.
    #[serde(default)]
    pub mood_intensity: Option<u8>,

    /// Whether the backend flagged the message as a crisis signal.
    #[serde(default)]
    pub crisis_detected: bool,

    /// Coping suggestions attached to the reply.
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Response of `GET /api/chat/history/{user_id}`.
///
/// Entries decode straight into the shared [`ChatMessage`] transcript type;
/// the backend sends `{role, text, timestamp}` and the mood annotations
/// default to absent.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatHistory {
    pub user_id: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    #[serde(default)]
    pub total_messages: u32,
}

/// Response of `DELETE /api/chat/history/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ClearHistoryResponse {
    #[serde(default)]
    pub success: bool,
}

// --- Mood types ---

/// Body for `POST /api/mood/log`.
///
/// `mood` is an opaque label and `intensity` is whatever the user chose on
/// the 0-100 scale; the backend owns the taxonomy and range checks.
#[derive(Debug, Clone, Serialize)]
pub struct MoodEntry {
    pub user_id: UserId,
    pub mood: String,
    pub intensity: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
}

/// Response of `POST /api/mood/log`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogMoodResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub insights: Option<MoodInsights>,
}

/// One logged entry from `GET /api/mood/history/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodHistoryEntry {
    pub id: String,
    pub mood: String,
    pub intensity: u8,
    pub timestamp: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Response of `GET /api/mood/history/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodHistory {
    pub user_id: String,
    #[serde(default)]
    pub history: Vec<MoodHistoryEntry>,
    #[serde(default)]
    pub insights: Option<MoodInsights>,
}

/// Aggregated insight payload from `GET /api/mood/insights/{user_id}`.
///
/// With no entries the backend sends only `message` and a zero count, so
/// everything else is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodInsights {
    #[serde(default)]
    pub entries_count: u32,
    #[serde(default)]
    pub most_common_mood: Option<MoodCount>,
    #[serde(default)]
    pub average_intensity: Option<f64>,
    #[serde(default)]
    pub trend: Option<String>,
    #[serde(default)]
    pub mood_distribution: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A mood label with its occurrence count.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodCount {
    pub mood: String,
    pub count: u32,
}

/// One mood change from `GET /api/mood/transitions/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodTransition {
    pub from_mood: String,
    pub to_mood: String,
    pub timestamp: String,
    #[serde(default)]
    pub intensity_change: i32,
}

/// Response of `GET /api/mood/transitions/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct MoodTransitions {
    pub user_id: String,
    #[serde(default)]
    pub transitions: Vec<MoodTransition>,
    #[serde(default)]
    pub total: u32,
}

/// Response of `GET /api/mood/current/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentMood {
    pub user_id: String,
    #[serde(default)]
    pub current_mood: Option<String>,
    #[serde(default)]
    pub current_intensity: Option<u8>,
    #[serde(default)]
    pub average_intensity: Option<f64>,
    #[serde(default)]
    pub mood_distribution: Option<BTreeMap<String, u32>>,
    #[serde(default)]
    pub recent_transitions: Option<Vec<MoodTransition>>,
    #[serde(default)]
    pub session_transitions_count: Option<u32>,
}

// --- User profile types ---

/// The profile object embedded in profile responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
}

/// Usage counters from `GET /api/user/profile/{user_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileStats {
    #[serde(default)]
    pub total_messages: u32,
    #[serde(default)]
    pub mood_entries: u32,
    #[serde(default)]
    pub days_active: u32,
}

/// Response of `GET /api/user/profile/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub profile: Profile,
    #[serde(default)]
    pub stats: ProfileStats,
}

/// Body for `POST /api/user/profile`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateProfileRequest {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<serde_json::Value>,
}

/// Response of `POST /api/user/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub profile: Option<Profile>,
}

// --- Wellness types ---

/// Body for `POST /api/wellness/recommendations`.
#[derive(Debug, Clone, Serialize)]
pub struct WellnessRequest {
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// One recommended activity.
///
/// The backend names this field `name` while older payloads used `title`;
/// the alias accepts both.
#[derive(Debug, Clone, Deserialize)]
pub struct WellnessActivity {
    #[serde(alias = "name")]
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

/// Response of `POST /api/wellness/recommendations`.
#[derive(Debug, Clone, Deserialize)]
pub struct WellnessRecommendations {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<WellnessActivity>,
}

/// Response of `GET /api/wellness/activities`: the full catalog, keyed by
/// category.
#[derive(Debug, Clone, Deserialize)]
pub struct WellnessCatalog {
    #[serde(default)]
    pub activities: BTreeMap<String, Vec<WellnessActivity>>,
}

// --- Spotify types ---

/// Body for `POST /api/spotify/recommend`.
#[derive(Debug, Clone, Serialize)]
pub struct SpotifyRequest {
    pub user_id: UserId,
    /// `"auto"` recommends from the current mood; `"search"` uses `query`.
    pub mode: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// A recommended track.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    #[serde(alias = "artists")]
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    pub external_url: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Response of `POST /api/spotify/recommend`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyRecommendation {
    /// The mood the recommendation was derived from, in auto mode.
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tracks: Vec<SpotifyTrack>,
}

// --- Health ---

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// Error body the backend sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_reply_decodes_duplex_frame_without_optional_fields() {
        // Duplex frames carry no session_id and may omit mood fields.
        let frame = r#"{"response": "I'm here for you.", "mood_stats": {"x": 1}}"#;
        let reply: ChatReply = serde_json::from_str(frame).unwrap();
        assert_eq!(reply.response, "I'm here for you.");
        assert!(reply.session_id.is_none());
        assert!(reply.mood_detected.is_none());
        assert!(reply.mood_intensity.is_none());
        assert!(!reply.crisis_detected);
        assert!(reply.suggestions.is_empty());
    }

    #[test]
    fn chat_reply_rejects_frame_without_response() {
        let frame = r#"{"mood_detected": "calm"}"#;
        assert!(serde_json::from_str::<ChatReply>(frame).is_err());
    }

    #[test]
    fn chat_history_decodes_into_transcript_messages() {
        let body = r#"{
            "user_id": "user_1",
            "history": [
                {"role": "user", "text": "hello", "timestamp": "2026-02-10T18:00:00Z"},
                {"role": "assistant", "text": "hi there", "timestamp": "2026-02-10T18:00:02Z"}
            ],
            "total_messages": 2
        }"#;
        let history: ChatHistory = serde_json::from_str(body).unwrap();
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[0].role, halcyon_core::Role::User);
        assert!(history.history[0].mood.is_none());
        assert!(!history.history[1].crisis);
    }

    #[test]
    fn chat_request_omits_absent_session_id() {
        let req = ChatRequest {
            user_id: UserId("user_1".into()),
            message: "hi".into(),
            session_id: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["user_id"], "user_1");
        assert_eq!(json["message"], "hi");
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn mood_entry_serializes_optionals_only_when_set() {
        let entry = MoodEntry {
            user_id: UserId("user_1".into()),
            mood: "anxious".into(),
            intensity: 72,
            notes: None,
            triggers: Some(vec!["work".into()]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["intensity"], 72);
        assert!(json.get("notes").is_none());
        assert_eq!(json["triggers"][0], "work");
    }

    #[test]
    fn insights_decode_empty_state_message() {
        let body = r#"{"message": "No mood entries yet", "entries_count": 0}"#;
        let insights: MoodInsights = serde_json::from_str(body).unwrap();
        assert_eq!(insights.entries_count, 0);
        assert_eq!(insights.message.as_deref(), Some("No mood entries yet"));
        assert!(insights.most_common_mood.is_none());
    }

    #[test]
    fn wellness_activity_accepts_name_alias() {
        let body = r#"{
            "name": "Box Breathing",
            "description": "Breathe in for 4, hold for 4, out for 4, hold for 4",
            "duration": "5-10 minutes",
            "difficulty": "easy",
            "benefits": ["reduces stress"]
        }"#;
        let activity: WellnessActivity = serde_json::from_str(body).unwrap();
        assert_eq!(activity.title, "Box Breathing");
        assert_eq!(activity.benefits.len(), 1);
    }

    #[test]
    fn spotify_track_accepts_artists_alias() {
        let body = r#"{
            "id": "t1",
            "name": "Weightless",
            "artists": "Marconi Union",
            "external_url": "https://open.spotify.com/track/t1"
        }"#;
        let track: SpotifyTrack = serde_json::from_str(body).unwrap();
        assert_eq!(track.artist, "Marconi Union");
        assert!(track.album.is_none());
    }
}
