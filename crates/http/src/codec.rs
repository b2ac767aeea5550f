//! JSON request/response helpers shared by every handler.

use axum::{
    extract::{rejection::PathRejection, Path},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}

/// Write `payload` as JSON with `status`, or only the status when there is
/// no payload.
///
/// An encoding failure is logged and the status is still sent, with an
/// empty body.
pub fn respond<T>(status: StatusCode, payload: Option<&T>) -> Response
where
    T: Serialize + ?Sized,
{
    let Some(payload) = payload else {
        return status.into_response();
    };

    let content_type = [(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    )];

    match serde_json::to_vec(payload) {
        Ok(body) => (status, content_type, body).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to encode response");
            (status, content_type).into_response()
        }
    }
}

/// Log `message` and send it as `{"message": ...}`
pub fn respond_error(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    tracing::error!(
        status_code = status.as_u16(),
        error_message = %message,
        "request failed"
    );
    respond(status, Some(&ErrorBody { message }))
}

/// Decode a JSON request body. Content-Type is not checked.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed request body");
        AppError::bad_request("Invalid request format")
    })
}

/// Parse a numeric path parameter, failing with `message` as a 400
pub fn parse_id(raw: &str, message: &'static str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::bad_request(message))
}

/// Like [`parse_id`], but also turns axum's own path rejection (for example
/// a segment that is not valid UTF-8) into the same JSON 400.
pub fn path_id(
    path: Result<Path<String>, PathRejection>,
    message: &'static str,
) -> Result<i64, AppError> {
    let Path(raw) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejecting undecodable path parameter");
        AppError::bad_request(message)
    })?;
    parse_id(&raw, message)
}
