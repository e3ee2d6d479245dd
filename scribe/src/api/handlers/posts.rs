use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    AppState,
    api::{
        extract::JsonBody,
        models::{
            pagination::PaginatedResponse,
            posts::{ListPostsQuery, PostCreate, PostResponse, PostUpdate},
            users::CurrentUser,
        },
    },
    db::handlers::posts::PostFilter,
    errors::Error,
    service::posts as post_service,
    types::PostId,
};

/// List posts, newest first
///
/// Every authenticated user sees every post.
#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    summary = "List posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "Page of posts", body = PaginatedResponse<PostResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = current_user.id))]
pub async fn list_posts(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PaginatedResponse<PostResponse>>, Error> {
    let skip = query.pagination.skip();
    let limit = query.pagination.limit();
    let mut filter = PostFilter::new(skip, limit);
    if let Some(author_id) = query.author_id {
        filter = filter.with_author(author_id);
    }

    let (posts, total_count) = post_service::list_posts(&state.db, &filter).await?;
    let data = posts.into_iter().map(PostResponse::from).collect();

    Ok(Json(PaginatedResponse::new(data, total_count, skip, limit)))
}

/// Create a post authored by the current user
#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    summary = "Create post",
    request_body = PostCreate,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 400, description = "Invalid title or content"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = current_user.id))]
pub async fn create_post(
    State(state): State<AppState>,
    current_user: CurrentUser,
    JsonBody(request): JsonBody<PostCreate>,
) -> Result<(StatusCode, Json<PostResponse>), Error> {
    let post = post_service::create_post(&state.db, &current_user, &request.title, &request.content).await?;
    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// Get a single post
#[utoipa::path(
    get,
    path = "/posts/{id}",
    tag = "posts",
    summary = "Get post",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 200, description = "The post", body = PostResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = current_user.id, post_id = id))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    current_user: CurrentUser,
) -> Result<Json<PostResponse>, Error> {
    let post = post_service::get_post(&state.db, id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Replace a post's title and content
///
/// Only the post's author may update it.
#[utoipa::path(
    put,
    path = "/posts/{id}",
    tag = "posts",
    summary = "Update post",
    params(("id" = i64, Path, description = "Post ID")),
    request_body = PostUpdate,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Invalid title or content"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author of this post"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = current_user.id, post_id = id))]
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    current_user: CurrentUser,
    JsonBody(request): JsonBody<PostUpdate>,
) -> Result<Json<PostResponse>, Error> {
    let post = post_service::update_post(&state.db, &current_user, id, &request.title, &request.content).await?;
    Ok(Json(PostResponse::from(post)))
}

/// Delete a post
///
/// Only the post's author may delete it.
#[utoipa::path(
    delete,
    path = "/posts/{id}",
    tag = "posts",
    summary = "Delete post",
    params(("id" = i64, Path, description = "Post ID")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not the author of this post"),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all, fields(user_id = current_user.id, post_id = id))]
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    current_user: CurrentUser,
) -> Result<StatusCode, Error> {
    post_service::delete_post(&state.db, &current_user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_post, create_test_server, create_test_user, session_cookie_for};
    use sqlx::SqlitePool;

    fn new_post(title: &str, content: &str) -> PostCreate {
        PostCreate {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[sqlx::test]
    async fn test_reads_require_authentication(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let post = create_test_post(&pool, &alice, "Hidden").await;
        let server = create_test_server(pool);

        server.get("/api/v1/posts").await.assert_status(StatusCode::UNAUTHORIZED);
        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        server
            .post("/api/v1/posts")
            .json(&new_post("t", "c"))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_create_and_read_round_trip(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let server = create_test_server(pool.clone());
        let cookie = session_cookie_for(&alice);

        let response = server
            .post("/api/v1/posts")
            .add_header("cookie", cookie.clone())
            .json(&new_post("Hello world", "My first post"))
            .await;
        response.assert_status(StatusCode::CREATED);
        let created: PostResponse = response.json();
        assert_eq!(created.author_id, alice.id);
        assert_eq!(created.author_username, "alice");

        let fetched: PostResponse = server
            .get(&format!("/api/v1/posts/{}", created.id))
            .add_header("cookie", cookie)
            .await
            .json();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "Hello world");
        assert_eq!(fetched.content, "My first post");
    }

    #[sqlx::test]
    async fn test_client_cannot_choose_author(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let bob = create_test_user(&pool, "bob").await;
        let server = create_test_server(pool);

        let response = server
            .post("/api/v1/posts")
            .add_header("cookie", session_cookie_for(&alice))
            .json(&serde_json::json!({ "title": "Sneaky", "content": "body", "author_id": bob.id }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let created: PostResponse = response.json();
        assert_eq!(created.author_id, alice.id);
    }

    #[sqlx::test]
    async fn test_missing_field_is_a_validation_error(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let post = create_test_post(&pool, &alice, "Original").await;
        let server = create_test_server(pool);
        let cookie = session_cookie_for(&alice);

        let response = server
            .post("/api/v1/posts")
            .add_header("cookie", cookie.clone())
            .json(&serde_json::json!({ "title": "only title" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("missing field `content`"));

        let response = server
            .put(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", cookie)
            .json(&serde_json::json!({ "content": "no title" }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(response.text().contains("missing field `title`"));
    }

    #[sqlx::test]
    async fn test_session_checked_before_query(pool: SqlitePool) {
        let server = create_test_server(pool);

        let response = server.get("/api/v1/posts?limit=x").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[sqlx::test]
    async fn test_list_posts_pagination_and_filter(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let bob = create_test_user(&pool, "bob").await;
        for i in 0..3 {
            create_test_post(&pool, &alice, &format!("alice {i}")).await;
        }
        create_test_post(&pool, &bob, "bob 0").await;
        let server = create_test_server(pool);
        let cookie = session_cookie_for(&bob);

        let page: PaginatedResponse<PostResponse> = server
            .get("/api/v1/posts?skip=1&limit=2")
            .add_header("cookie", cookie.clone())
            .await
            .json();
        assert_eq!(page.total_count, 4);
        assert_eq!(page.skip, 1);
        assert_eq!(page.limit, 2);
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].title, "alice 2");

        let alice_only: PaginatedResponse<PostResponse> = server
            .get(&format!("/api/v1/posts?author_id={}", alice.id))
            .add_header("cookie", cookie.clone())
            .await
            .json();
        assert_eq!(alice_only.total_count, 3);
        assert!(alice_only.data.iter().all(|p| p.author_id == alice.id));

        let clamped: PaginatedResponse<PostResponse> = server
            .get("/api/v1/posts?limit=100000")
            .add_header("cookie", cookie)
            .await
            .json();
        assert_eq!(clamped.limit, 500);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_non_owner_update_is_forbidden(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let bob = create_test_user(&pool, "bob").await;
        let post = create_test_post(&pool, &alice, "Alice's thoughts").await;
        let server = create_test_server(pool);

        let response = server
            .put(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", session_cookie_for(&bob))
            .json(&PostUpdate {
                title: "Bob was here".to_string(),
                content: "overwritten".to_string(),
            })
            .await;
        response.assert_status(StatusCode::FORBIDDEN);

        let unchanged: PostResponse = server
            .get(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", session_cookie_for(&alice))
            .await
            .json();
        assert_eq!(unchanged.title, "Alice's thoughts");
    }

    #[sqlx::test]
    async fn test_owner_update_and_delete(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let post = create_test_post(&pool, &alice, "Draft").await;
        let server = create_test_server(pool);
        let cookie = session_cookie_for(&alice);

        let updated: PostResponse = server
            .put(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", cookie.clone())
            .json(&PostUpdate {
                title: "Published".to_string(),
                content: "Final text".to_string(),
            })
            .await
            .json();
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.title, "Published");

        server
            .delete(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", cookie.clone())
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", cookie)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[sqlx::test]
    async fn test_delete_nonexistent_post(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let server = create_test_server(pool);

        let response = server
            .delete("/api/v1/posts/9999")
            .add_header("cookie", session_cookie_for(&alice))
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.text(), "Post with ID 9999 not found");
    }

    #[sqlx::test]
    async fn test_non_owner_delete_is_forbidden(pool: SqlitePool) {
        let alice = create_test_user(&pool, "alice").await;
        let bob = create_test_user(&pool, "bob").await;
        let post = create_test_post(&pool, &alice, "Mine").await;
        let server = create_test_server(pool);

        server
            .delete(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", session_cookie_for(&bob))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get(&format!("/api/v1/posts/{}", post.id))
            .add_header("cookie", session_cookie_for(&bob))
            .await
            .assert_status_ok();
    }
}
