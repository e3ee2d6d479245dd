//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with SQLite.
//! It follows the Repository pattern to provide clean abstractions over database operations.
//!
//! ```text
//! ┌─────────────┐
//! │  Services   │  (service - operations shared by the API and the web pages)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │ Repositories│  (db::handlers - queries)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │   Models    │  (db::models - database records)
//! └──────┬──────┘
//!        ↓
//! ┌─────────────┐
//! │   SQLite    │
//! └─────────────┘
//! ```
//!
//! # Transactions
//!
//! Repositories wrap a `&mut SqliteConnection`, so they work equally on a pooled
//! connection or on an open transaction. Anything that reads and then writes must
//! run on a transaction:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Posts::new(&mut tx);
//! // ... operations ...
//! tx.commit().await?;
//! ```
//!
//! # Migrations
//!
//! Migrations live in the crate's `migrations/` directory and are embedded by
//! [`crate::migrator`]:
//!
//! ```ignore
//! scribe::migrator().run(&pool).await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
