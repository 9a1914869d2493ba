//! Movie recommendations over a static ratings table.
//!
//! Three independent rankers share one immutable [`dataset::Dataset`]:
//! genre popularity, same-genre content similarity, and user-based
//! collaborative filtering. The [`api`] module serves them over HTTP.

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
