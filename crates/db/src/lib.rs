//! Storage collaborator for the bookstore API.
//!
//! Handlers talk to the database only through the [`Queries`] trait, which
//! reports the no-rows condition as [`DbError::NotFound`] so callers can map it
//! to a 404 where appropriate.

pub mod error;
pub mod models;
pub mod postgres;
pub mod queries;

pub use error::DbError;
pub use models::{Author, AuthorStats, Book, CreateBookParams, UpdateBookParams};
pub use postgres::{connect, PgQueries};
pub use queries::Queries;
