use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult, models::RecommendationResponse, routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub username: Option<String>,
}

/// Handler for recommendations endpoint
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let response = recommendations::recommend_for_user(
        state.preferences.as_ref(),
        &state.catalog,
        params.username.as_deref(),
    )
    .await?;

    tracing::info!(
        count = response.recommendations.len(),
        message = %response.message,
        "Recommendations served"
    );

    Ok(Json(response))
}
