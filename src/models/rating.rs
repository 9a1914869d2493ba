use serde::{Deserialize, Serialize};

/// Identifier of a user in the ratings table
pub type UserId = i64;

/// Identifier of a movie in the ratings table
pub type MovieId = i64;

/// One row of the merged users/movies/ratings table
///
/// `genres` is an opaque label: a multi-category value such as
/// `"Comedy|Drama"` is compared as a whole string, never split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub title: String,
    pub genres: String,
    pub rating: f64,
}

impl RatingRecord {
    pub fn new(
        user_id: UserId,
        movie_id: MovieId,
        title: impl Into<String>,
        genres: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            user_id,
            movie_id,
            title: title.into(),
            genres: genres.into(),
            rating,
        }
    }
}
