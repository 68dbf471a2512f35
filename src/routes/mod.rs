use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub mod images;
pub mod pages;
pub mod preferences;
pub mod recommendations;
pub mod state;

pub use state::AppState;

use crate::middleware::with_request_tracing;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .merge(api_routes())
        .merge(pages::page_routes(&state.pages_dir))
        .with_state(state);

    with_request_tracing(router)
}

/// JSON endpoints called by the pages
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/save_preferences", post(preferences::save_preferences))
        .route(
            "/get_recommendations",
            get(recommendations::get_recommendations),
        )
        .route("/get_images", post(images::get_images))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
