//! Request body extractors for the JSON API.

use axum::extract::FromRequest;

use crate::errors::Error;

/// [`axum::Json`] whose rejection is an [`Error::Validation`], so a malformed body or a missing
/// field answers `400` with the same plain-text message as any other invalid input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);
