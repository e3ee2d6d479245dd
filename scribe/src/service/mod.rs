//! Core operations shared by the JSON API and the HTML site.
//!
//! Handlers on both surfaces are thin: they extract input and the acting
//! [`CurrentUser`](crate::api::models::users::CurrentUser), call into this
//! module, and render the result. Validation, ownership checks and
//! transaction boundaries all live here, so the two surfaces cannot drift.

pub mod accounts;
pub mod posts;
