//! HTTP handlers for the JSON API under `/api/v1`.
//!
//! Handlers extract request data, call into [`crate::service`], and convert
//! results into API models. Errors are returned as [`crate::errors::Error`],
//! which renders the status code and a user-safe message.

pub mod auth;
pub mod posts;
