//! Blog post operations and their ownership rules.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    api::models::users::CurrentUser,
    auth::permissions::require_post_owner,
    db::{
        errors::DbError,
        handlers::{ListableRepository, MutableRepository, Repository, posts::{PostFilter, Posts}},
        models::posts::{PostCreateDBRequest, PostDBResponse, PostUpdateDBRequest},
    },
    errors::{Error, Result},
    types::{Operation, PostId, Resource},
};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LENGTH: usize = 150;

/// A title and body that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

impl PostInput {
    /// Titles are stored trimmed; content is stored as written but may not be blank.
    pub fn parse(title: &str, content: &str) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::validation("Title is required"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(Error::validation(format!(
                "Title must be no more than {MAX_TITLE_LENGTH} characters"
            )));
        }
        if content.trim().is_empty() {
            return Err(Error::validation("Content is required"));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
        })
    }
}

fn not_found(id: PostId) -> Error {
    Error::NotFound {
        resource: Resource::Posts,
        id: id.to_string(),
    }
}

/// Publish a post as `current_user`.
#[instrument(skip(db, current_user, title, content), fields(user_id = current_user.id), err)]
pub async fn create_post(db: &SqlitePool, current_user: &CurrentUser, title: &str, content: &str) -> Result<PostDBResponse> {
    let input = PostInput::parse(title, content)?;

    let mut conn = db.acquire().await.map_err(DbError::from)?;
    let post = Posts::new(&mut conn)
        .create(&PostCreateDBRequest {
            title: input.title,
            content: input.content,
            author_id: current_user.id,
        })
        .await?;

    Ok(post)
}

/// One page of posts, newest first, with the total number matching the filter.
#[instrument(skip(db, filter), err)]
pub async fn list_posts(db: &SqlitePool, filter: &PostFilter) -> Result<(Vec<PostDBResponse>, i64)> {
    let mut tx = db.begin().await.map_err(DbError::from)?;
    let mut repo = Posts::new(&mut tx);

    let posts = repo.list(filter).await?;
    let total_count = repo.count(filter).await?;
    tx.commit().await.map_err(DbError::from)?;

    Ok((posts, total_count))
}

#[instrument(skip(db), err)]
pub async fn get_post(db: &SqlitePool, id: PostId) -> Result<PostDBResponse> {
    let mut conn = db.acquire().await.map_err(DbError::from)?;
    Posts::new(&mut conn).get_by_id(id).await?.ok_or_else(|| not_found(id))
}

/// Fetch a post for editing, rejecting anyone but its author.
#[instrument(skip(db, current_user), fields(user_id = current_user.id), err)]
pub async fn get_post_for_edit(db: &SqlitePool, current_user: &CurrentUser, id: PostId) -> Result<PostDBResponse> {
    let post = get_post(db, id).await?;
    require_post_owner(current_user, post.author_id, Operation::UpdateOwn)?;
    Ok(post)
}

/// Replace a post's title and content.
///
/// Lookup, ownership check and write share one transaction, so the post
/// cannot change hands or vanish between the check and the update.
#[instrument(skip(db, current_user, title, content), fields(user_id = current_user.id), err)]
pub async fn update_post(
    db: &SqlitePool,
    current_user: &CurrentUser,
    id: PostId,
    title: &str,
    content: &str,
) -> Result<PostDBResponse> {
    let mut tx = db.begin().await.map_err(DbError::from)?;
    let mut repo = Posts::new(&mut tx);

    let existing = repo.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    require_post_owner(current_user, existing.author_id, Operation::UpdateOwn)?;
    let input = PostInput::parse(title, content)?;

    let updated = repo
        .update(
            id,
            &PostUpdateDBRequest {
                title: input.title,
                content: input.content,
            },
        )
        .await?;
    tx.commit().await.map_err(DbError::from)?;

    Ok(updated)
}

/// Permanently remove a post.
#[instrument(skip(db, current_user), fields(user_id = current_user.id), err)]
pub async fn delete_post(db: &SqlitePool, current_user: &CurrentUser, id: PostId) -> Result<()> {
    let mut tx = db.begin().await.map_err(DbError::from)?;
    let mut repo = Posts::new(&mut tx);

    let existing = repo.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    require_post_owner(current_user, existing.author_id, Operation::DeleteOwn)?;

    if !repo.delete(id).await? {
        return Err(not_found(id));
    }
    tx.commit().await.map_err(DbError::from)?;

    Ok(())
}
