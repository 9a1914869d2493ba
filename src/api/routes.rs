use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            // Request ids must exist before the trace span is built
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Enumeration
        .route("/genres", get(handlers::get_genres))
        .route("/movies", get(handlers::get_movies))
        .route("/users", get(handlers::get_users))
        // Dataset
        .route("/dataset", get(handlers::get_dataset))
        .route("/dataset/reload", post(handlers::reload_dataset))
        // Recommendations
        .route("/recommendations/popularity", get(handlers::popularity))
        .route("/recommendations/content", get(handlers::content))
        .route("/recommendations/collaborative", get(handlers::collaborative))
}
