use serde::{Deserialize, Serialize};

pub mod product;
pub mod user_preferences;

pub use product::{Product, Recommendation, IMAGE_URL_PREFIX};
pub use user_preferences::{is_no_preference, PreferenceRecord, StylePreferences, NO_PREFERENCE};

/// Maximum number of products returned for one request
pub const MAX_RECOMMENDATIONS: usize = 50;

/// Outcome of a recommendation lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationStatus {
    MissingUsername,
    NoPreferences,
    NoMatches,
    Found,
}

impl RecommendationStatus {
    pub fn message(&self) -> &'static str {
        match self {
            RecommendationStatus::MissingUsername => "Username not provided!",
            RecommendationStatus::NoPreferences => "No preferences found!",
            RecommendationStatus::NoMatches => "No matching recommendations found!",
            RecommendationStatus::Found => "Recommendations found!",
        }
    }
}

/// Body of `GET /get_recommendations`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResponse {
    pub message: String,
    pub recommendations: Vec<Recommendation>,
}

impl RecommendationResponse {
    /// An empty result explained by `status`
    pub fn empty(status: RecommendationStatus) -> Self {
        Self {
            message: status.message().to_string(),
            recommendations: Vec::new(),
        }
    }

    pub fn found(recommendations: Vec<Recommendation>) -> Self {
        if recommendations.is_empty() {
            return Self::empty(RecommendationStatus::NoMatches);
        }
        Self {
            message: RecommendationStatus::Found.message().to_string(),
            recommendations,
        }
    }
}

/// Plain `{message}` body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Body of `POST /get_images`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImagesResponse {
    pub images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_serializes_exactly() {
        let response = RecommendationResponse::empty(RecommendationStatus::NoPreferences);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"message": "No preferences found!", "recommendations": []})
        );
    }

    #[test]
    fn test_found_with_nothing_is_no_matches() {
        let response = RecommendationResponse::found(Vec::new());
        assert_eq!(response.message, "No matching recommendations found!");
    }

    #[test]
    fn test_messages_are_distinct() {
        let statuses = [
            RecommendationStatus::MissingUsername,
            RecommendationStatus::NoPreferences,
            RecommendationStatus::NoMatches,
            RecommendationStatus::Found,
        ];
        let mut messages: Vec<_> = statuses.iter().map(|s| s.message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), statuses.len());
    }
}
