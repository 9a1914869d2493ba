use crate::{
    dataset::Dataset,
    error::{AppError, AppResult},
    models::Recommendation,
};

use super::aggregate::rank_movies;

/// Ranks movies sharing the genre label of `movie_title`
///
/// The label comes from the first row carrying the title. The queried movie
/// is part of its own genre and can appear in the result.
#[tracing::instrument(skip(dataset))]
pub fn rank_by_content(
    dataset: &Dataset,
    movie_title: &str,
    top_n: usize,
) -> AppResult<Vec<Recommendation>> {
    AppError::require_positive("top_n", top_n)?;

    let genre = dataset
        .genre_of_title(movie_title)
        .ok_or_else(|| AppError::NotFound(format!("movie title '{movie_title}'")))?;

    let rows = dataset.records().iter().filter(|r| r.genres == genre);
    let ranked = rank_movies(dataset, rows, 1, top_n);

    tracing::debug!(genre, results = ranked.len(), "Content ranking computed");
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingRecord;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            RatingRecord::new(1, 1, "A", "Comedy", 4.0),
            RatingRecord::new(2, 1, "A", "Comedy", 5.0),
            RatingRecord::new(3, 1, "A", "Comedy", 3.0),
            RatingRecord::new(1, 2, "B", "Comedy", 5.0),
            RatingRecord::new(2, 2, "B", "Comedy", 5.0),
            RatingRecord::new(1, 3, "D", "Drama", 4.5),
        ])
    }

    #[test]
    fn test_includes_query_movie() {
        let ranked = rank_by_content(&dataset(), "A", 10).unwrap();
        let titles: Vec<&str> = ranked.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_only_same_genre() {
        let ranked = rank_by_content(&dataset(), "D", 10).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "D");
        assert_eq!(ranked[0].num_reviews, 1);
    }

    #[test]
    fn test_first_row_decides_genre() {
        let mut records = dataset().records().to_vec();
        records.push(RatingRecord::new(4, 1, "A", "Drama", 1.0));
        let ranked = rank_by_content(&Dataset::new(records), "A", 10).unwrap();
        assert!(ranked.iter().all(|r| r.title != "D"));
    }

    #[test]
    fn test_top_n_truncates() {
        let ranked = rank_by_content(&dataset(), "B", 1).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].title, "B");
    }

    #[test]
    fn test_unknown_title() {
        assert!(matches!(
            rank_by_content(&dataset(), "Nope", 5),
            Err(AppError::NotFound(_))
        ));
    }
}
