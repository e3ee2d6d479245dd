//! Shared helpers for unit and HTTP-level tests.

use crate::{
    AppState,
    api::models::{auth::LoginRequest, users::CurrentUser},
    auth::{password, session},
    config::Config,
    db::{
        handlers::{Posts, Repository, Users},
        models::{posts::PostCreateDBRequest, posts::PostDBResponse, users::UserCreateDBRequest},
    },
};
use axum::http::header;
use axum_test::TestServer;
use sqlx::SqlitePool;

/// Password given to every user made by [`create_test_user`].
pub const TEST_PASSWORD: &str = "password123";

pub fn create_test_config() -> Config {
    let mut config = Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        secret_key: Some("test-secret-key-for-testing-only".to_string()),
        ..Default::default()
    };
    config.auth.native.session.cookie_secure = false;

    // Cheap hashing for tests
    let password = &mut config.auth.native.password;
    password.argon2_memory_kib = 1024;
    password.argon2_iterations = 1;
    password.argon2_parallelism = 1;

    config
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    create_test_state_with_config(pool, create_test_config())
}

pub fn create_test_state_with_config(pool: SqlitePool, config: Config) -> AppState {
    AppState::builder().db(pool).config(config).build()
}

pub fn create_test_server(pool: SqlitePool) -> TestServer {
    create_test_server_with_config(pool, create_test_config())
}

pub fn create_test_server_with_config(pool: SqlitePool, config: Config) -> TestServer {
    let state = create_test_state_with_config(pool, config);
    let router = crate::build_router(&state).expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}

/// Insert a user whose password is [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> CurrentUser {
    let params = create_test_config().auth.native.password.argon2_params();
    let password_hash = password::hash_password(TEST_PASSWORD, params).expect("Failed to hash test password");

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    let user = Users::new(&mut conn)
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash,
        })
        .await
        .expect("Failed to create test user");

    CurrentUser::from(user)
}

pub async fn create_test_post(pool: &SqlitePool, author: &CurrentUser, title: &str) -> PostDBResponse {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Posts::new(&mut conn)
        .create(&PostCreateDBRequest {
            title: title.to_string(),
            content: format!("Content of {title}"),
            author_id: author.id,
        })
        .await
        .expect("Failed to create test post")
}

/// `Cookie` header value carrying a session for `user`, signed with the test config.
pub fn session_cookie_for(user: &CurrentUser) -> String {
    let config = create_test_config();
    let token = session::create_session_token(user, &config).expect("Failed to sign test session");
    format!("{}={}", config.auth.native.session.cookie_name, token)
}

/// Log in through the API and return the `name=token` pair from `Set-Cookie`.
pub async fn login_cookie(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/api/v1/authentication/login")
        .json(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await;
    response.assert_status_ok();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login response sets a cookie")
        .to_str()
        .expect("cookie is ASCII");
    set_cookie.split(';').next().unwrap_or_default().to_string()
}
