//! Repository implementations for database access.
//!
//! Each repository:
//! - Wraps a SQLx connection or transaction
//! - Provides strongly-typed CRUD operations
//! - Handles query construction and parameter binding
//! - Returns domain models from [`crate::db::models`]
//!
//! # Available Repositories
//!
//! - [`Users`]: User accounts and credential lookup
//! - [`Posts`]: Blog posts and their ownership
//!
//! # Common Pattern
//!
//! ```ignore
//! use scribe::db::handlers::{ListableRepository, Posts, posts::PostFilter};
//!
//! async fn example(pool: &sqlx::SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut repo = Posts::new(&mut tx);
//!     let posts = repo.list(&PostFilter::default()).await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```

pub mod posts;
pub mod repository;
pub mod users;

pub use posts::Posts;
pub use repository::{ListableRepository, MutableRepository, Repository};
pub use users::Users;
