//! Error types for the user directory.

use axum::response::{IntoResponse, Response};

use crate::codec;

/// Failures a query can surface to the HTTP layer.
///
/// Every variant is confined to the request that produced it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The store could not be reached, the query could not be dispatched,
    /// iteration failed midway, or the request deadline elapsed.
    #[error("{0}")]
    StoreUnavailable(String),

    /// A stored document does not have the user record shape.
    #[error("{0}")]
    Decode(String),

    /// No document matched the requested `user_id`.
    #[error("no user found with user_id {0:?}")]
    NotFound(String),
}

impl From<mongodb::error::Error> for Error {
    fn from(err: mongodb::error::Error) -> Self {
        Error::StoreUnavailable(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for Error {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        codec::encode_error(self)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
