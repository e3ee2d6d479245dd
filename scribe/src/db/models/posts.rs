//! Database models for blog posts.

use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new post
#[derive(Debug, Clone)]
pub struct PostCreateDBRequest {
    pub title: String,
    pub content: String,
    pub author_id: UserId,
}

/// Database request for updating a post.
///
/// Both fields are always written together; there is no partial update.
#[derive(Debug, Clone)]
pub struct PostUpdateDBRequest {
    pub title: String,
    pub content: String,
}

/// Database response for a post, joined with its author's username
#[derive(Debug, Clone)]
pub struct PostDBResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
