//! PostgreSQL implementation of [`Queries`].

use anyhow::Context;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use bookstore_kernel::settings::DatabaseSettings;

use crate::{
    error::DbError,
    models::{Author, AuthorStats, Book, CreateBookParams, UpdateBookParams},
    queries::Queries,
};

const BOOK_COLUMNS: &str = "id, title, isbn, description, price, author_id, published_date";

/// Open a connection pool using the configured URL and pool size
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<PgPool> {
    tracing::info!(
        max_connections = settings.max_connections,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.url)
        .await
        .context("failed to connect to database")
}

/// [`Queries`] backed by a shared [`PgPool`].
#[derive(Clone)]
pub struct PgQueries {
    pool: PgPool,
}

impl PgQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Queries for PgQueries {
    async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        let authors = sqlx::query_as::<_, Author>("SELECT id, name, bio FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(authors)
    }

    async fn get_author_stats(&self, author_id: i64) -> Result<AuthorStats, DbError> {
        let stats = sqlx::query_as::<_, AuthorStats>(
            r#"
            SELECT a.id                       AS author_id,
                   a.name                     AS name,
                   COUNT(b.id)                AS book_count,
                   ROUND(AVG(b.price), 2)     AS average_price,
                   MAX(b.published_date)      AS latest_published
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            WHERE a.id = $1
            GROUP BY a.id, a.name
            "#,
        )
        .bind(author_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }

    async fn list_books(&self) -> Result<Vec<Book>, DbError> {
        let books =
            sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;
        Ok(books)
    }

    async fn create_book(&self, params: CreateBookParams) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (title, isbn, description, price, author_id, published_date) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(params.title)
        .bind(params.isbn)
        .bind(params.description)
        .bind(params.price)
        .bind(params.author_id)
        .bind(params.published_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(book_id = book.id, "book inserted");
        Ok(book)
    }

    async fn get_book(&self, id: i64) -> Result<Book, DbError> {
        let book =
            sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(book)
    }

    async fn update_book(&self, params: UpdateBookParams) -> Result<Book, DbError> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "UPDATE books \
             SET title = $2, description = $3, price = COALESCE($4, price), published_date = $5 \
             WHERE id = $1 \
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(params.id)
        .bind(params.title)
        .bind(params.description)
        .bind(params.price)
        .bind(params.published_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(book)
    }

    async fn delete_book(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }
        Ok(())
    }
}
