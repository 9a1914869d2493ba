use crate::{
    dataset::Dataset,
    error::{AppError, AppResult},
    models::Recommendation,
};

use super::aggregate::rank_movies;

/// Ranks the movies of one genre by mean rating
///
/// Only rows whose genre label equals `genre` exactly take part, so
/// `"Comedy"` does not match a movie labelled `"Comedy|Drama"`. Movies with
/// fewer than `min_reviews` ratings in that genre are dropped. An unknown
/// genre yields an empty ranking.
#[tracing::instrument(skip(dataset))]
pub fn rank_by_popularity(
    dataset: &Dataset,
    genre: &str,
    min_reviews: usize,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    AppError::require_positive("min_reviews", min_reviews)?;
    AppError::require_positive("top_n", top_n)?;

    let rows = dataset.records().iter().filter(|r| r.genres == genre);
    let ranked = rank_movies(dataset, rows, min_reviews, top_n);

    tracing::debug!(results = ranked.len(), "Popularity ranking computed");
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingRecord;

    fn recommendation(title: &str, avg_rating: f64, num_reviews: usize) -> Recommendation {
        Recommendation {
            title: title.to_string(),
            avg_rating,
            num_reviews,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(vec![
            RatingRecord::new(1, 1, "A", "Comedy", 4.0),
            RatingRecord::new(2, 1, "A", "Comedy", 5.0),
            RatingRecord::new(3, 1, "A", "Comedy", 3.0),
            RatingRecord::new(1, 2, "B", "Comedy", 5.0),
            RatingRecord::new(2, 2, "B", "Comedy", 5.0),
            RatingRecord::new(1, 3, "C", "Comedy|Drama", 5.0),
            RatingRecord::new(2, 3, "C", "Comedy|Drama", 5.0),
        ])
    }

    #[test]
    fn test_ranks_by_average_rating() {
        let ranked = rank_by_popularity(&dataset(), "Comedy", 2, 5).unwrap();
        assert_eq!(
            ranked,
            vec![recommendation("B", 5.0, 2), recommendation("A", 4.0, 3)]
        );
    }

    #[test]
    fn test_nan_rating_never_ranks() {
        let dataset = Dataset::new(vec![
            RatingRecord::new(1, 1, "A", "Comedy", 5.0),
            RatingRecord::new(1, 2, "B", "Comedy", f64::NAN),
        ]);
        let ranked = rank_by_popularity(&dataset, "Comedy", 1, 5).unwrap();
        assert_eq!(ranked, vec![recommendation("A", 5.0, 1)]);
    }

    #[test]
    fn test_genre_is_exact_match() {
        let ranked = rank_by_popularity(&dataset(), "Comedy", 1, 10).unwrap();
        assert!(ranked.iter().all(|r| r.title != "C"));

        let ranked = rank_by_popularity(&dataset(), "Comedy|Drama", 1, 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "C");
    }

    #[test]
    fn test_min_reviews_filters_groups() {
        let ranked = rank_by_popularity(&dataset(), "Comedy", 3, 5).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "A");
    }

    #[test]
    fn test_unknown_genre_is_empty() {
        assert!(rank_by_popularity(&dataset(), "Western", 1, 5).unwrap().is_empty());
    }

    #[test]
    fn test_zero_parameters_rejected() {
        assert!(matches!(
            rank_by_popularity(&dataset(), "Comedy", 0, 5),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            rank_by_popularity(&dataset(), "Comedy", 1, 0),
            Err(AppError::InvalidInput(_))
        ));
    }
}
