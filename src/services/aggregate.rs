use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::{
    dataset::Dataset,
    models::{MovieAggregate, MovieId, RatingRecord, Recommendation},
};

/// Groups rows by movie, computing mean rating and review count
///
/// Output is in ascending movie id order. Movies with no rows are absent.
pub fn aggregate_by_movie<'a, I>(rows: I) -> Vec<MovieAggregate>
where
    I: IntoIterator<Item = &'a RatingRecord>,
{
    let mut groups: BTreeMap<MovieId, (f64, usize)> = BTreeMap::new();
    for row in rows {
        let entry = groups.entry(row.movie_id).or_insert((0.0, 0));
        entry.0 += row.rating;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(movie_id, (sum, count))| MovieAggregate {
            movie_id,
            avg_rating: sum / count as f64,
            num_reviews: count,
        })
        .collect()
}

/// Highest mean first; equal means fall back to ascending movie id
pub fn compare_aggregates(a: &MovieAggregate, b: &MovieAggregate) -> Ordering {
    b.avg_rating
        .total_cmp(&a.avg_rating)
        .then_with(|| a.movie_id.cmp(&b.movie_id))
}

/// Shared tail of every recommender: aggregate, threshold, rank, truncate,
/// and attach titles
pub fn rank_movies<'a, I>(
    dataset: &Dataset,
    rows: I,
    min_reviews: usize,
    top_n: usize,
) -> Vec<Recommendation>
where
    I: IntoIterator<Item = &'a RatingRecord>,
{
    let mut aggregates: Vec<MovieAggregate> = aggregate_by_movie(rows)
        .into_iter()
        .filter(|a| a.num_reviews >= min_reviews)
        .collect();

    aggregates.sort_by(compare_aggregates);
    aggregates.truncate(top_n);

    aggregates
        .into_iter()
        .map(|a| Recommendation {
            title: dataset
                .title_of(a.movie_id)
                .map(str::to_owned)
                .unwrap_or_default(),
            avg_rating: a.avg_rating,
            num_reviews: a.num_reviews,
        })
        .collect()
}
