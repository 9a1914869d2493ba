pub mod rating;
pub mod recommendation;

pub use rating::{MovieId, RatingRecord, UserId};
pub use recommendation::{
    CollaborativeQuery, ContentQuery, DatasetSummary, MovieAggregate, PopularityQuery,
    Recommendation,
};
