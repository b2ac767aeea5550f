//! Book endpoints. Each handler runs parse id → decode → validate → convert
//! → storage call → respond, returning at the first failure.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Response,
};
use bookstore_db::DbError;
use bookstore_http::{decode_json, path_id, respond, AppError, ErrorBody};

use super::models::{BookEnvelope, BookList, BookMutation, CreateBookRequest, UpdateBookRequest};
use crate::{context::ApiContext, validate::Validate};

const INVALID_ID: &str = "Invalid book ID";

fn storage_error(err: DbError) -> AppError {
    AppError::internal(err.to_string())
}

/// List every book
#[utoipa::path(
    get,
    path = "/api/v1/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = BookList),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn list_books(State(ctx): State<ApiContext>) -> Result<Response, AppError> {
    let books = ctx.queries().list_books().await.map_err(|err| {
        tracing::error!(error = %err, "listing books failed");
        AppError::internal("Failed fetching list of books")
    })?;

    Ok(respond(StatusCode::OK, Some(&BookList { books })))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/v1/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 200, description = "Book created", body = BookMutation),
        (status = 400, description = "Malformed body, failed validation, or bad date", body = ErrorBody),
        (status = 500, description = "Price conversion or insert failure", body = ErrorBody)
    )
)]
pub async fn create_book(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: CreateBookRequest = decode_json(&body)?;
    request.validate()?;
    let params = request.into_params()?;

    let book = ctx
        .queries()
        .create_book(params)
        .await
        .map_err(storage_error)?;

    tracing::info!(book_id = book.id, "book created");
    let response = BookMutation {
        message: "Book created successfully".to_string(),
        book,
    };
    Ok(respond(StatusCode::OK, Some(&response)))
}

/// Fetch one book
#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book", body = BookEnvelope),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 404, description = "No such book", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn get_book(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let id = path_id(path, INVALID_ID)?;

    let book = ctx.queries().get_book(id).await.map_err(|err| {
        if err.is_not_found() {
            AppError::not_found("Failed to find book")
        } else {
            storage_error(err)
        }
    })?;

    Ok(respond(StatusCode::OK, Some(&BookEnvelope { book })))
}

/// Rewrite a book's title, description, price and publication date
///
/// A missing id surfaces as 500, not 404.
#[utoipa::path(
    put,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookMutation),
        (status = 400, description = "Bad id, malformed body, failed validation, or bad date", body = ErrorBody),
        (status = 500, description = "Price conversion or update failure", body = ErrorBody)
    )
)]
pub async fn update_book(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Response, AppError> {
    let id = path_id(path, INVALID_ID)?;
    let request: UpdateBookRequest = decode_json(&body)?;
    request.validate()?;
    let params = request.into_params(id)?;

    let book = ctx
        .queries()
        .update_book(params)
        .await
        .map_err(storage_error)?;

    let response = BookMutation {
        message: "Book updated successfully".to_string(),
        book,
    };
    Ok(respond(StatusCode::OK, Some(&response)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 400, description = "Non-numeric id", body = ErrorBody),
        (status = 404, description = "No such book", body = ErrorBody),
        (status = 500, description = "Storage failure", body = ErrorBody)
    )
)]
pub async fn delete_book(
    State(ctx): State<ApiContext>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Response, AppError> {
    let id = path_id(path, INVALID_ID)?;

    ctx.queries().delete_book(id).await.map_err(|err| {
        if err.is_not_found() {
            AppError::not_found("Book not found")
        } else {
            storage_error(err)
        }
    })?;

    tracing::info!(book_id = id, "book deleted");
    Ok(respond::<()>(StatusCode::NO_CONTENT, None))
}
