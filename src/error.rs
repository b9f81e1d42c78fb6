//! Error types for request handling and the plant store.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use mongodb::bson::oid::{self, ObjectId};
use thiserror::Error;

use crate::views::ErrorTemplate;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A path segment that is not a valid store identifier.
    #[error("Invalid identifier '{id}': {source}")]
    InvalidIdentifier {
        id: String,
        #[source]
        source: oid::Error,
    },

    /// The store holds no document with this identifier.
    #[error("No {collection} document with id {id}")]
    NotFound {
        collection: &'static str,
        id: ObjectId,
    },

    /// Connection or transport failure talking to the document store.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] mongodb::error::Error),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl Error {
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Parses a path segment into a store identifier.
pub fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|source| Error::InvalidIdentifier {
        id: id.to_string(),
        source,
    })
}

/// Turns `NotFound` into `None` so pages can render without the document.
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for Result<T> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(Error::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request failed");
        }

        let page = ErrorTemplate {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Error"),
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Error page failed to render");
                (status, status.to_string()).into_response()
            }
        }
    }
}
