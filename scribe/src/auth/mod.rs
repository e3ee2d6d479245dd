//! Authentication and authorization.
//!
//! # Sessions
//!
//! Browser and API clients share one mechanism: a signed JWT in an HTTP-only
//! cookie, issued by a successful login and cleared by logout.
//! - Tokens carry the user id and username, so no server-side session store exists
//! - Tokens expire after `auth.security.jwt_expiry`; an expired token is the same as no token
//! - Passwords are hashed with Argon2id on the blocking thread pool
//!
//! # Authorization
//!
//! Ownership is the only rule: every authenticated user reads everything and
//! writes only their own posts. See [`permissions`].
//!
//! # Modules
//!
//! - [`current_user`]: Extractor for the authenticated user in handlers
//! - [`password`]: Password hashing and verification using Argon2
//! - [`permissions`]: Ownership guard applied before mutations
//! - [`session`]: Session token and cookie handling
//!
//! # Usage in Handlers
//!
//! ```ignore
//! use scribe::api::models::users::CurrentUser;
//!
//! async fn protected_handler(current_user: CurrentUser) -> String {
//!     format!("Hello, {}!", current_user.username)
//! }
//! ```

pub mod current_user;
pub mod password;
pub mod permissions;
pub mod session;
