//! Database repository for blog posts.
//!
//! Responses are always joined with `users` so callers get the author's
//! username alongside `author_id` without a second lookup.

use crate::types::{PostId, UserId};
use crate::db::{
    errors::{DbError, Result},
    handlers::repository::{ListableRepository, MutableRepository, Repository},
    models::posts::{PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
};
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqliteConnection};
use tracing::instrument;

/// Filter for listing posts
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub skip: i64,
    /// `None` returns every remaining row
    pub limit: Option<i64>,
    pub author_id: Option<UserId>,
}

impl PostFilter {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip,
            limit: Some(limit),
            author_id: None,
        }
    }

    pub fn with_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }
}

// Database entity model
#[derive(Debug, Clone, FromRow)]
struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDBResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author_id: post.author_id,
            author_username: post.author_username,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.content, p.author_id, u.username AS author_username, p.created_at, p.updated_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
"#;

pub struct Posts<'c> {
    db: &'c mut SqliteConnection,
}

impl<'c> Posts<'c> {
    pub fn new(db: &'c mut SqliteConnection) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Posts<'c> {
    type CreateRequest = PostCreateDBRequest;
    type Response = PostDBResponse;
    type Id = PostId;

    #[instrument(skip(self, request), fields(author_id = request.author_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let now = Utc::now();
        let id: PostId = sqlx::query_scalar(
            r#"
            INSERT INTO posts (title, content, author_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id
            "#,
        )
        .bind(&request.title)
        .bind(&request.content)
        .bind(request.author_id)
        .bind(now)
        .fetch_one(&mut *self.db)
        .await?;

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(post_id = id), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let post = sqlx::query_as::<_, Post>(&format!("{SELECT_POST} WHERE p.id = ?1"))
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(post.map(PostDBResponse::from))
    }
}

#[async_trait::async_trait]
impl<'c> ListableRepository for Posts<'c> {
    type Filter = PostFilter;

    #[instrument(skip(self, filter), fields(limit = ?filter.limit, skip = filter.skip, author_id = ?filter.author_id), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>> {
        // SQLite treats a negative LIMIT as "no limit"
        let posts = sqlx::query_as::<_, Post>(&format!(
            "{SELECT_POST} WHERE (?1 IS NULL OR p.author_id = ?1) ORDER BY p.id DESC LIMIT ?2 OFFSET ?3"
        ))
        .bind(filter.author_id)
        .bind(filter.limit.unwrap_or(-1))
        .bind(filter.skip)
        .fetch_all(&mut *self.db)
        .await?;

        Ok(posts.into_iter().map(PostDBResponse::from).collect())
    }

    /// Number of posts matching the filter's author constraint, ignoring pagination.
    #[instrument(skip(self, filter), fields(author_id = ?filter.author_id), err)]
    async fn count(&mut self, filter: &Self::Filter) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE (?1 IS NULL OR author_id = ?1)")
            .bind(filter.author_id)
            .fetch_one(&mut *self.db)
            .await?;
        Ok(count)
    }
}

#[async_trait::async_trait]
impl<'c> MutableRepository for Posts<'c> {
    type UpdateRequest = PostUpdateDBRequest;

    #[instrument(skip(self, request), fields(post_id = id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response> {
        let result = sqlx::query("UPDATE posts SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4")
            .bind(&request.title)
            .bind(&request.content)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound);
        }

        self.get_by_id(id).await?.ok_or(DbError::NotFound)
    }

    #[instrument(skip(self), fields(post_id = id), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = ?1").bind(id).execute(&mut *self.db).await?;

        Ok(result.rows_affected() > 0)
    }
}
