use bookstore_db::{Book, CreateBookParams, UpdateBookParams};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::{
    convert::{self, ConvertError},
    validate::{ensure, Validate, ValidationError},
};

/// Request body for creating a book.
///
/// Absent fields decode to empty values and are rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateBookRequest {
    pub title: String,
    pub isbn: String,
    /// Empty string stores no description
    pub description: String,
    /// `null` reads as 0
    #[serde(deserialize_with = "null_as_zero")]
    #[schema(example = 12.5)]
    pub price: f64,
    pub author_id: i64,
    #[schema(example = "1965-08-01")]
    pub published_date: String,
}

/// Request body for rewriting a book.
///
/// A `null` or missing price keeps the stored price.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateBookRequest {
    pub title: String,
    pub isbn: String,
    pub description: String,
    #[schema(example = 12.5)]
    pub price: Option<f64>,
    pub author_id: i64,
    #[schema(example = "1965-08-01")]
    pub published_date: String,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}

fn check_fields(
    title: &str,
    isbn: &str,
    price: Option<f64>,
    author_id: i64,
    published_date: &str,
) -> Result<(), ValidationError> {
    ensure(!title.is_empty(), "title is required")?;
    ensure(!isbn.is_empty(), "isbn is required")?;
    ensure(
        price.map_or(true, |price| price >= 0.0),
        "price must not be negative",
    )?;
    ensure(author_id > 0, "author_id is required")?;
    ensure(!published_date.is_empty(), "published_date is required")
}

impl Validate for CreateBookRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_fields(
            &self.title,
            &self.isbn,
            Some(self.price),
            self.author_id,
            &self.published_date,
        )
    }
}

impl Validate for UpdateBookRequest {
    fn validate(&self) -> Result<(), ValidationError> {
        check_fields(
            &self.title,
            &self.isbn,
            self.price,
            self.author_id,
            &self.published_date,
        )
    }
}

impl CreateBookRequest {
    /// Convert wire values to insert parameters. Price is converted before
    /// the date.
    pub fn into_params(self) -> Result<CreateBookParams, ConvertError> {
        let price = convert::price_to_decimal(self.price)?;
        let published_date = convert::parse_date(&self.published_date)?;

        Ok(CreateBookParams {
            title: self.title,
            isbn: self.isbn,
            description: convert::optional_text(self.description),
            price,
            author_id: self.author_id,
            published_date,
        })
    }
}

impl UpdateBookRequest {
    pub fn into_params(self, id: i64) -> Result<UpdateBookParams, ConvertError> {
        let price = self.price.map(convert::price_to_decimal).transpose()?;
        let published_date = convert::parse_date(&self.published_date)?;

        Ok(UpdateBookParams {
            id,
            title: self.title,
            description: convert::optional_text(self.description),
            price,
            published_date,
        })
    }
}

/// `{"books": [...]}`
#[derive(Debug, Serialize, ToSchema)]
pub struct BookList {
    pub books: Vec<Book>,
}

/// `{"book": {...}}`
#[derive(Debug, Serialize, ToSchema)]
pub struct BookEnvelope {
    pub book: Book,
}

/// Result of a create or update
#[derive(Debug, Serialize, ToSchema)]
pub struct BookMutation {
    #[schema(example = "Book created successfully")]
    pub message: String,
    pub book: Book,
}
