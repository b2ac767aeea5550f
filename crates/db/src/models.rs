use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use utoipa::ToSchema;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// An author row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

/// Aggregate figures for a single author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct AuthorStats {
    pub author_id: i64,
    pub name: String,
    pub book_count: i64,
    /// Mean price of the author's books, `null` when they have none
    #[schema(value_type = Option<String>, example = "14.25")]
    pub average_price: Option<Decimal>,
    #[serde(with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub latest_published: Option<Date>,
}

/// A book row. Prices carry two decimal places and serialize as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub description: Option<String>,
    #[schema(value_type = String, example = "12.50")]
    pub price: Decimal,
    pub author_id: i64,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "1965-08-01")]
    pub published_date: Date,
}

/// Column values for inserting a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBookParams {
    pub title: String,
    pub isbn: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub author_id: i64,
    pub published_date: Date,
}

/// Column values for rewriting a book by id.
///
/// `price: None` leaves the stored price untouched. ISBN and author are not
/// part of an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBookParams {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub published_date: Date,
}
