//! Conversions from wire scalars to storage column types.

use std::str::FromStr;

use bookstore_http::AppError;
use rust_decimal::Decimal;
use thiserror::Error;
use time::{macros::format_description, Date};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Failed to convert price")]
    Price,

    #[error("Invalid date format")]
    Date,
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        match err {
            // Reported as a server fault even though the value came from the client.
            ConvertError::Price => AppError::internal(err.to_string()),
            ConvertError::Date => AppError::bad_request(err.to_string()),
        }
    }
}

/// Empty text is stored as NULL.
pub fn optional_text(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Round a wire price to two decimals and carry it as a fixed-point value.
///
/// The float is rendered as text first so the stored value is exactly what
/// `{:.2}` shows, with no binary rounding residue. Values that do not fit
/// with both decimals intact are rejected rather than rounded.
pub fn price_to_decimal(value: f64) -> Result<Decimal, ConvertError> {
    let text = format!("{:.2}", value);
    let mut price = Decimal::from_str_exact(&text).map_err(|err| {
        tracing::debug!(price = %text, error = %err, "price is not representable");
        ConvertError::Price
    })?;
    if price.scale() != 2 {
        tracing::debug!(price = %text, "price lost its decimal places");
        return Err(ConvertError::Price);
    }

    if price.is_zero() {
        price.set_sign_positive(true);
    }
    Ok(price)
}

/// Parse a `YYYY-MM-DD` calendar date. The year carries no sign.
pub fn parse_date(value: &str) -> Result<Date, ConvertError> {
    if !value.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ConvertError::Date);
    }
    Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| ConvertError::Date)
}
