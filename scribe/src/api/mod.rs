//! JSON API served under `/api/v1`.
//!
//! - [`handlers`]: Axum route handlers for authentication and posts
//! - [`extract`]: body extractors that report malformed input as validation errors
//! - [`models`]: request and response types, documented with `utoipa`
//!
//! Every endpoint except registration, login and logout requires the session
//! cookie set by `POST /authentication/login`.

pub mod extract;
pub mod handlers;
pub mod models;
