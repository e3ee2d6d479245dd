//! API request/response models for blog posts.

use super::pagination::Pagination;
use crate::db::models::posts::PostDBResponse;
use crate::types::{PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Request body for creating a post. The author is always the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostCreate {
    /// Post title (1-150 characters)
    pub title: String,
    /// Post body
    pub content: String,
}

/// Request body for updating a post. Both fields are replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters for listing posts
#[serde_as]
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pagination: Pagination,

    /// Only return posts written by this user
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub author_id: Option<UserId>,
}

impl From<PostDBResponse> for PostResponse {
    fn from(db: PostDBResponse) -> Self {
        Self {
            id: db.id,
            title: db.title,
            content: db.content,
            author_id: db.author_id,
            author_username: db.author_username,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
