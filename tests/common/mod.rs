#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    str::FromStr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    response::Response,
    Router,
};
use bookstore_app::{modules, ApiContext};
use bookstore_db::{
    Author, AuthorStats, Book, CreateBookParams, DbError, Queries, UpdateBookParams,
};
use bookstore_kernel::{settings::Settings, ModuleRegistry};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use time::macros::date;

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i64, Author>,
    books: BTreeMap<i64, Book>,
    next_book_id: i64,
}

/// In-memory stand-in for the PostgreSQL queries that counts every call.
#[derive(Default)]
pub struct MemoryQueries {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Two authors; Frank Herbert owns two books, Le Guin none.
    pub fn seeded() -> Self {
        let store = Self::new();
        {
            let mut tables = store.tables.lock().unwrap();
            tables.authors.insert(
                1,
                Author {
                    id: 1,
                    name: "Frank Herbert".to_string(),
                    bio: Some("American science-fiction author".to_string()),
                },
            );
            tables.authors.insert(
                2,
                Author {
                    id: 2,
                    name: "Ursula K. Le Guin".to_string(),
                    bio: None,
                },
            );
            tables.books.insert(
                1,
                Book {
                    id: 1,
                    title: "Dune".to_string(),
                    isbn: "9780441013593".to_string(),
                    description: None,
                    price: Decimal::from_str("12.50").unwrap(),
                    author_id: 1,
                    published_date: date!(1965 - 08 - 01),
                },
            );
            tables.books.insert(
                2,
                Book {
                    id: 2,
                    title: "Dune Messiah".to_string(),
                    isbn: "9780593098233".to_string(),
                    description: Some("The second Dune novel".to_string()),
                    price: Decimal::from_str("16.00").unwrap(),
                    author_id: 1,
                    published_date: date!(1969 - 10 - 15),
                },
            );
            tables.next_book_id = 2;
        }
        store
    }

    /// Only authors, no books.
    pub fn with_authors() -> Self {
        let store = Self::seeded();
        store.tables.lock().unwrap().books.clear();
        store
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Queries for MemoryQueries {
    async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        self.touch();
        Ok(self.tables.lock().unwrap().authors.values().cloned().collect())
    }

    async fn get_author_stats(&self, author_id: i64) -> Result<AuthorStats, DbError> {
        self.touch();
        let tables = self.tables.lock().unwrap();
        let author = tables.authors.get(&author_id).ok_or(DbError::NotFound)?;

        let books: Vec<&Book> = tables
            .books
            .values()
            .filter(|book| book.author_id == author_id)
            .collect();
        let book_count = books.len() as i64;
        let average_price = if books.is_empty() {
            None
        } else {
            let total: Decimal = books.iter().map(|book| book.price).sum();
            Some((total / Decimal::from(book_count)).round_dp(2))
        };

        Ok(AuthorStats {
            author_id,
            name: author.name.clone(),
            book_count,
            average_price,
            latest_published: books.iter().map(|book| book.published_date).max(),
        })
    }

    async fn list_books(&self) -> Result<Vec<Book>, DbError> {
        self.touch();
        Ok(self.tables.lock().unwrap().books.values().cloned().collect())
    }

    async fn create_book(&self, params: CreateBookParams) -> Result<Book, DbError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        if !tables.authors.contains_key(&params.author_id) {
            return Err(DbError::Database(sqlx::Error::Protocol(
                "insert on table \"books\" violates foreign key constraint".to_string(),
            )));
        }

        tables.next_book_id += 1;
        let book = Book {
            id: tables.next_book_id,
            title: params.title,
            isbn: params.isbn,
            description: params.description,
            price: params.price,
            author_id: params.author_id,
            published_date: params.published_date,
        };
        tables.books.insert(book.id, book.clone());
        Ok(book)
    }

    async fn get_book(&self, id: i64) -> Result<Book, DbError> {
        self.touch();
        self.tables
            .lock()
            .unwrap()
            .books
            .get(&id)
            .cloned()
            .ok_or(DbError::NotFound)
    }

    async fn update_book(&self, params: UpdateBookParams) -> Result<Book, DbError> {
        self.touch();
        let mut tables = self.tables.lock().unwrap();
        let book = tables.books.get_mut(&params.id).ok_or(DbError::NotFound)?;

        book.title = params.title;
        book.description = params.description;
        if let Some(price) = params.price {
            book.price = price;
        }
        book.published_date = params.published_date;
        Ok(book.clone())
    }

    async fn delete_book(&self, id: i64) -> Result<(), DbError> {
        self.touch();
        self.tables
            .lock()
            .unwrap()
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(DbError::NotFound)
    }
}

/// Every call fails the way an unreachable database would.
pub struct FailingQueries;

fn unavailable() -> DbError {
    DbError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl Queries for FailingQueries {
    async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
        Err(unavailable())
    }

    async fn get_author_stats(&self, _author_id: i64) -> Result<AuthorStats, DbError> {
        Err(unavailable())
    }

    async fn list_books(&self) -> Result<Vec<Book>, DbError> {
        Err(unavailable())
    }

    async fn create_book(&self, _params: CreateBookParams) -> Result<Book, DbError> {
        Err(unavailable())
    }

    async fn get_book(&self, _id: i64) -> Result<Book, DbError> {
        Err(unavailable())
    }

    async fn update_book(&self, _params: UpdateBookParams) -> Result<Book, DbError> {
        Err(unavailable())
    }

    async fn delete_book(&self, _id: i64) -> Result<(), DbError> {
        Err(unavailable())
    }
}

/// The full service router over `queries`
pub fn app(queries: Arc<dyn Queries>) -> Router {
    let ctx = ApiContext::new(queries);
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &ctx);
    bookstore_http::build_router(&registry, &Settings::default())
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> axum::body::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}
