use serde::{Deserialize, Serialize};

use super::MovieId;

/// Per-movie aggregate over a filtered subset of ratings
#[derive(Debug, Clone, PartialEq)]
pub struct MovieAggregate {
    pub movie_id: MovieId,
    pub avg_rating: f64,
    pub num_reviews: usize,
}

/// A single ranked recommendation returned to the caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub avg_rating: f64,
    pub num_reviews: usize,
}

/// Query for genre popularity ranking
#[derive(Debug, Deserialize)]
pub struct PopularityQuery {
    pub genre: String,
    pub min_reviews: Option<usize>,
    pub top_n: Option<usize>,
}

/// Query for same-genre content ranking
#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub title: String,
    pub top_n: Option<usize>,
}

/// Query for user-based collaborative ranking
#[derive(Debug, Deserialize)]
pub struct CollaborativeQuery {
    pub user_id: super::UserId,
    pub top_n: Option<usize>,
    pub k: Option<usize>,
}

/// Summary of the currently loaded dataset
#[derive(Debug, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub genres: usize,
    pub movies: usize,
    pub users: usize,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}
