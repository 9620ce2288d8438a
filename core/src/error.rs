//! Error types for the catalog client and its storage capability.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the remote API answers 404 for
//! an empty search, which callers present differently from an outage. All
//! other non-2xx responses land in `HttpError` with the raw status and body.
//! Transport failures never originate in the core (it does no I/O); hosts
//! report them as `Transport` when feeding a failed round-trip back.

use thiserror::Error;

/// Errors produced while building requests or interpreting responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// An episode batch was requested with no ids.
    #[error("episode id list is empty")]
    EmptyIdList,

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors from a `KeyValueStore` backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a JSON object of strings.
    #[error("store is corrupt: {0}")]
    Corrupt(String),

    #[error("value could not be serialized: {0}")]
    Serialize(String),
}
