//! In-memory ratings table shared by every recommender.
//!
//! A [`Dataset`] is built once from a loader and never mutated afterwards.
//! Replacing it means building a new one and swapping the shared handle.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::models::{DatasetSummary, MovieId, RatingRecord, UserId};

pub mod loader;

pub use loader::{DatasetLoader, FileDatasetLoader, InMemoryDatasetLoader};

/// Immutable merged ratings table
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<RatingRecord>,
    titles: HashMap<MovieId, String>,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Builds a dataset from rows in source order
    ///
    /// Rows whose rating is not a finite number are left out, so every
    /// aggregate is a mean over real ratings.
    pub fn new(mut records: Vec<RatingRecord>) -> Self {
        let before = records.len();
        records.retain(|r| r.rating.is_finite());
        if records.len() < before {
            tracing::warn!(
                dropped = before - records.len(),
                "Dropped rows with non-finite ratings"
            );
        }

        let mut titles = HashMap::new();
        for record in &records {
            // First-seen title wins when a movie id carries several titles
            titles
                .entry(record.movie_id)
                .or_insert_with(|| record.title.clone());
        }

        Self {
            records,
            titles,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[RatingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Title a movie id is reported under
    pub fn title_of(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(&movie_id).map(String::as_str)
    }

    /// Genre label of the first row carrying `title`
    pub fn genre_of_title(&self, title: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.title == title)
            .map(|r| r.genres.as_str())
    }

    /// Sorted, duplicate-free genre labels
    pub fn unique_genres(&self) -> Vec<String> {
        self.unique_strings(|r| &r.genres)
    }

    /// Sorted, duplicate-free movie titles
    pub fn unique_movies(&self) -> Vec<String> {
        self.unique_strings(|r| &r.title)
    }

    /// Sorted, duplicate-free user ids
    pub fn unique_users(&self) -> Vec<UserId> {
        self.records
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            records: self.len(),
            genres: self.unique_genres().len(),
            movies: self.unique_movies().len(),
            users: self.unique_users().len(),
            loaded_at: self.loaded_at,
        }
    }

    fn unique_strings<F>(&self, field: F) -> Vec<String>
    where
        F: Fn(&RatingRecord) -> &String,
    {
        self.records
            .iter()
            .map(field)
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect()
    }
}
