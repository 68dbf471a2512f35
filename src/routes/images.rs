use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{AppError, AppResult},
    models::ImagesResponse,
    routes::AppState,
    services::images::{self, Gender},
};

#[derive(Debug, Deserialize)]
pub struct ImagesRequest {
    #[serde(default)]
    pub gender: Option<Value>,
}

/// Handler listing the images of one gender folder
pub async fn get_images(
    State(state): State<AppState>,
    body: Result<Json<ImagesRequest>, JsonRejection>,
) -> AppResult<Json<ImagesResponse>> {
    let Json(request) = body.map_err(|rejection| AppError::InvalidInput(rejection.body_text()))?;

    // Anything but a recognized string is an invalid gender
    let gender: Gender = request
        .gender
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .parse()?;

    let images = images::list_images(&state.images_dir, gender).await;
    Ok(Json(ImagesResponse { images }))
}
