use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{
        CollaborativeQuery, ContentQuery, DatasetSummary, PopularityQuery, Recommendation, UserId,
    },
    services,
};

use super::AppState;

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get all genre labels
pub async fn get_genres(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset().await.unique_genres())
}

/// Get all movie titles
pub async fn get_movies(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.dataset().await.unique_movies())
}

/// Get all user ids
pub async fn get_users(State(state): State<AppState>) -> Json<Vec<UserId>> {
    Json(state.dataset().await.unique_users())
}

/// Describe the loaded dataset
pub async fn get_dataset(State(state): State<AppState>) -> Json<DatasetSummary> {
    Json(state.dataset().await.summary())
}

/// Reload the dataset from its source
pub async fn reload_dataset(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<DatasetSummary>> {
    tracing::info!(request_id = %request_id, "Reloading dataset");
    let dataset = state.reload().await?;
    Ok(Json(dataset.summary()))
}

/// Top-rated movies within one genre
pub async fn popularity(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<PopularityQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let min_reviews = query.min_reviews.unwrap_or(state.config.default_min_reviews);
    let top_n = query.top_n.unwrap_or(state.config.default_top_n);

    tracing::info!(
        request_id = %request_id,
        genre = %query.genre,
        min_reviews,
        top_n,
        "Processing popularity request"
    );

    let dataset = state.dataset().await;
    let ranked = services::rank_by_popularity(&dataset, &query.genre, min_reviews, top_n)?;
    Ok(Json(ranked))
}

/// Top-rated movies sharing a movie's genre label
pub async fn content(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<ContentQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let top_n = query.top_n.unwrap_or(state.config.default_top_n);

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        top_n,
        "Processing content request"
    );

    let dataset = state.dataset().await;
    let ranked = services::rank_by_content(&dataset, &query.title, top_n)?;
    Ok(Json(ranked))
}

/// Top-rated movies among the users most similar to one user
pub async fn collaborative(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<CollaborativeQuery>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let top_n = query.top_n.unwrap_or(state.config.default_top_n);
    let k = query.k.unwrap_or(state.config.default_k);
    let user_id = query.user_id;

    tracing::info!(
        request_id = %request_id,
        user_id,
        top_n,
        k,
        "Processing collaborative request"
    );

    // Dense similarity is CPU bound; keep it off the async workers
    let dataset = state.dataset().await;
    let ranked = tokio::task::spawn_blocking(move || {
        services::rank_by_collaborative(&dataset, user_id, top_n, k)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(ranked))
}
