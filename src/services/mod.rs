//! Recommendation computations over an immutable [`Dataset`](crate::dataset::Dataset).
//!
//! Each ranker is a pure function of its arguments and the dataset, so the
//! same inputs always produce the same ranking.

pub mod aggregate;
pub mod collaborative;
pub mod content;
pub mod popularity;

pub use collaborative::rank_by_collaborative;
pub use content::rank_by_content;
pub use popularity::rank_by_popularity;
