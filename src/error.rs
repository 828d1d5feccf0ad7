//! Defines the crate level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The preset key is not one of the recognised range presets.
    ///
    /// Callers should pass in the key exactly as it was received.
    #[error("\"{0}\" is not a valid date range preset")]
    InvalidPreset(String),

    /// A custom range was requested with bounds that are missing, cannot be
    /// parsed as dates, or where the start falls after the end.
    #[error("invalid date range: {0}")]
    InvalidRange(String),

    /// The reference instant could not be parsed, or it lies too close to the
    /// edge of the supported calendar to compute month boundaries around it.
    #[error("invalid reference date: {0}")]
    InvalidReference(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// A query string could not be decoded into, or encoded from, range parameters.
    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// Whether the error was caused by the caller's input rather than by the server.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPreset(_)
                | Error::InvalidRange(_)
                | Error::InvalidReference(_)
                | Error::InvalidQuery(_)
        )
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            error if error.is_validation_error() => {
                tracing::warn!("Rejected request: {error}");
                (StatusCode::BAD_REQUEST, error.to_string())
            }
            Error::NotFound => (StatusCode::NOT_FOUND, Error::NotFound.to_string()),
            Error::InvalidTimezone(timezone) => {
                tracing::error!("Could not get local timezone \"{timezone}\"");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                        ensure the timezone has been set to a valid, canonical timezone string"
                    ),
                )
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
