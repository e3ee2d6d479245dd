//! Database record models.
//!
//! These structs are what repositories accept and return. They are kept apart from
//! the API models in [`crate::api::models`] so that storage and wire formats can
//! evolve independently; conversions live next to the API models.
//!
//! - [`users`]: user accounts and their password hashes
//! - [`posts`]: blog posts and their owning author

pub mod posts;
pub mod users;
