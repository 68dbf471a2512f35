use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::AppResult,
    models::{MessageResponse, StylePreferences},
    routes::AppState,
    services::recommendations,
};

/// Body of `POST /save_preferences`
///
/// Fields stay untyped so a malformed value is answered with a `{message}` 400
/// instead of the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct SavePreferencesRequest {
    #[serde(default)]
    pub username: Option<Value>,
    #[serde(default)]
    pub preferences: Option<Value>,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<MessageResponse>) {
    (StatusCode::BAD_REQUEST, Json(MessageResponse::new(message)))
}

/// Handler for saving a user's style preferences
pub async fn save_preferences(
    State(state): State<AppState>,
    body: Result<Json<SavePreferencesRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    let Json(request) = match body {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected preferences body");
            return Ok(bad_request("Username not provided!"));
        }
    };

    let Some(username) = request
        .username
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|u| !u.is_empty())
    else {
        return Ok(bad_request("Username not provided!"));
    };

    let preferences = match request.preferences {
        None | Some(Value::Null) => StylePreferences::default(),
        Some(value) => match serde_json::from_value::<StylePreferences>(value) {
            Ok(preferences) => preferences,
            Err(e) => return Ok(bad_request(format!("Invalid preferences: {}", e))),
        },
    };

    recommendations::save_preferences(state.preferences.as_ref(), username, preferences).await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse::new("Preferences saved successfully!")),
    ))
}
