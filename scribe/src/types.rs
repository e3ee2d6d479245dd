//! Common type definitions and the vocabulary of the permission system.
//!
//! # ID Types
//!
//! Entity IDs are SQLite integer primary keys, wrapped in type aliases so that
//! signatures say which table an ID belongs to:
//!
//! - [`UserId`]: User account identifier
//! - [`PostId`]: Blog post identifier
//!
//! # Permissions
//!
//! Authorization failures are described by a [`Resource`] and the [`Operation`]
//! that was attempted on it. Posts are readable by any authenticated user, so the
//! only guarded operations are the `*Own` ones, restricted to entities the acting
//! user owns.

use std::fmt;

pub type UserId = i64;
pub type PostId = i64;

// *-Own means restricted to own resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    UpdateOwn,
    DeleteOwn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Posts,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::UpdateOwn => write!(f, "update"),
            Operation::DeleteOwn => write!(f, "delete"),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Posts => write!(f, "Post"),
        }
    }
}
