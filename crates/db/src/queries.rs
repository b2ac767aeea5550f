use async_trait::async_trait;

use crate::{
    error::DbError,
    models::{Author, AuthorStats, Book, CreateBookParams, UpdateBookParams},
};

/// Typed query surface the HTTP handlers depend on.
///
/// Each call is awaited once with no retries; dropping the returned future
/// cancels the in-flight query.
#[async_trait]
pub trait Queries: Send + Sync {
    async fn list_authors(&self) -> Result<Vec<Author>, DbError>;

    async fn get_author_stats(&self, author_id: i64) -> Result<AuthorStats, DbError>;

    async fn list_books(&self) -> Result<Vec<Book>, DbError>;

    async fn create_book(&self, params: CreateBookParams) -> Result<Book, DbError>;

    async fn get_book(&self, id: i64) -> Result<Book, DbError>;

    /// Fails with [`DbError::NotFound`] when no book has `params.id`.
    async fn update_book(&self, params: UpdateBookParams) -> Result<Book, DbError>;

    /// Fails with [`DbError::NotFound`] when no book has `id`.
    async fn delete_book(&self, id: i64) -> Result<(), DbError>;
}
