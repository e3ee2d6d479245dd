//! API request and response models.
//!
//! These types define the JSON contract of the `/api/v1` surface and carry
//! the `utoipa` schema annotations the OpenAPI document is generated from.
//! They are kept separate from [`crate::db::models`] so that, for example,
//! password hashes can never leak into a response by accident.

pub mod auth;
pub mod pagination;
pub mod posts;
pub mod users;
