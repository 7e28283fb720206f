//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use roomconf_app::error_format::to_lines;
use roomconf_domain::error::{CompilationErrors, RoomConfError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// JSON body of a failed compilation: display lines plus structured records.
#[derive(Serialize)]
struct ValidationBody<'a> {
    errors: Vec<String>,
    details: &'a [ValidationError],
}

/// Maps [`RoomConfError`] to an HTTP response with appropriate status code.
pub struct ApiError(RoomConfError);

impl From<RoomConfError> for ApiError {
    fn from(err: RoomConfError) -> Self {
        Self(err)
    }
}

impl From<CompilationErrors> for ApiError {
    fn from(err: CompilationErrors) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RoomConfError::Compilation(errors) => {
                let body = ValidationBody {
                    errors: to_lines(errors.errors()),
                    details: errors.errors(),
                };
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            RoomConfError::EmptyDocument => (StatusCode::BAD_REQUEST, self.0.to_string()),
            RoomConfError::Serialization(err) => {
                tracing::error!(error = %err, "serialization error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            RoomConfError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
