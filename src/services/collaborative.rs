//! User-based collaborative filtering.
//!
//! Users are rows of a dense user x movie matrix, compared by cosine
//! similarity. The ratings of the `k` nearest users are then ranked with the
//! same aggregation as the other recommenders.
//!
//! Building the full similarity matrix costs O(U^2 * M) time and O(U * M)
//! memory for the rating matrix. That is fine for MovieLens-small sized data;
//! large user counts would need a sparse representation.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::{
    dataset::Dataset,
    error::{AppError, AppResult},
    models::{MovieId, RatingRecord, Recommendation, UserId},
};

use super::aggregate::rank_movies;

/// Dense user x movie ratings with an explicit user id -> row mapping
///
/// Rows follow ascending user id, columns ascending movie id. A missing
/// rating is stored as 0.0. Repeated ratings of one movie by one user are
/// averaged into a single cell.
#[derive(Debug, Clone)]
pub struct RatingMatrix {
    users: Vec<UserId>,
    movies: Vec<MovieId>,
    row_of: HashMap<UserId, usize>,
    cells: Vec<Vec<f64>>,
}

impl RatingMatrix {
    pub fn build(records: &[RatingRecord]) -> Self {
        let users: Vec<UserId> = records
            .iter()
            .map(|r| r.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let movies: Vec<MovieId> = records
            .iter()
            .map(|r| r.movie_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let row_of: HashMap<UserId, usize> =
            users.iter().enumerate().map(|(i, &u)| (u, i)).collect();
        let col_of: HashMap<MovieId, usize> =
            movies.iter().enumerate().map(|(j, &m)| (m, j)).collect();

        let mut sums = vec![vec![0.0; movies.len()]; users.len()];
        let mut counts = vec![vec![0u32; movies.len()]; users.len()];
        for record in records {
            let (i, j) = (row_of[&record.user_id], col_of[&record.movie_id]);
            sums[i][j] += record.rating;
            counts[i][j] += 1;
        }

        for (row, row_counts) in sums.iter_mut().zip(&counts) {
            for (cell, &count) in row.iter_mut().zip(row_counts) {
                if count > 1 {
                    *cell /= f64::from(count);
                }
            }
        }

        Self {
            users,
            movies,
            row_of,
            cells: sums,
        }
    }

    pub fn num_users(&self) -> usize {
        self.users.len()
    }

    pub fn num_movies(&self) -> usize {
        self.movies.len()
    }

    /// Row holding `user_id`, if the user has any ratings
    pub fn row_index(&self, user_id: UserId) -> Option<usize> {
        self.row_of.get(&user_id).copied()
    }

    pub fn user_at(&self, row: usize) -> UserId {
        self.users[row]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row]
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }
}

/// Cosine of the angle between two vectors; 0.0 when either is all zeros
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    cosine_with_norms(a, b, norm(a), norm(b))
}

fn cosine_with_norms(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    dot / (norm_a * norm_b)
}

fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Symmetric all-pairs cosine similarity between matrix rows
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    values: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    pub fn cosine(matrix: &RatingMatrix) -> Self {
        let rows = matrix.rows();
        let norms: Vec<f64> = rows.iter().map(|r| norm(r)).collect();
        let n = rows.len();
        let mut values = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in i..n {
                let sim = cosine_with_norms(&rows[i], &rows[j], norms[i], norms[j]);
                values[i][j] = sim;
                values[j][i] = sim;
            }
        }

        Self { values }
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i]
    }
}

/// The `k` users most similar to the user at `row`, excluding that user
///
/// Equal similarities are ordered by ascending user id. Fewer than `k` users
/// are returned when the matrix has fewer other rows.
pub fn nearest_users(
    matrix: &RatingMatrix,
    similarity: &SimilarityMatrix,
    row: usize,
    k: usize,
) -> Vec<UserId> {
    let mut candidates: Vec<(usize, f64)> = similarity
        .row(row)
        .iter()
        .copied()
        .enumerate()
        .filter(|&(other, _)| other != row)
        .collect();

    candidates.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => matrix.user_at(a.0).cmp(&matrix.user_at(b.0)),
        ord => ord,
    });

    candidates
        .into_iter()
        .take(k)
        .map(|(other, _)| matrix.user_at(other))
        .collect()
}

/// Ranks movies by the mean rating the `k` nearest users gave them
///
/// `user_id` is a user identifier, resolved to its matrix row through the
/// explicit mapping. A user with no ratings is rejected as out of range.
#[tracing::instrument(skip(dataset))]
pub fn rank_by_collaborative(
    dataset: &Dataset,
    user_id: UserId,
    top_n: usize,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    AppError::require_positive("top_n", top_n)?;
    AppError::require_positive("k", k)?;

    let matrix = RatingMatrix::build(dataset.records());
    let row = matrix.row_index(user_id).ok_or_else(|| {
        AppError::OutOfRange(format!(
            "user {user_id} is not one of the {} users in the rating matrix",
            matrix.num_users()
        ))
    })?;

    let similarity = SimilarityMatrix::cosine(&matrix);
    let neighbours = nearest_users(&matrix, &similarity, row, k);

    tracing::debug!(
        users = matrix.num_users(),
        movies = matrix.num_movies(),
        neighbours = ?neighbours,
        "Nearest users selected"
    );

    let pool: HashSet<UserId> = neighbours.into_iter().collect();
    let rows = dataset
        .records()
        .iter()
        .filter(|r| pool.contains(&r.user_id));

    Ok(rank_movies(dataset, rows, 1, top_n))
}
