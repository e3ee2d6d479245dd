use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::{
        extract::JsonBody,
        models::{
            auth::{AuthResponse, AuthSuccessResponse, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest},
            users::{CurrentUser, UserResponse},
        },
    },
    auth::session,
    errors::Error,
    service::accounts,
};

/// Register a new user account
///
/// Registration does not start a session; log in afterwards.
#[utoipa::path(
    post,
    path = "/authentication/register",
    tag = "authentication",
    summary = "Register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = AuthResponse),
        (status = 400, description = "Invalid input or registration disabled"),
        (status = 409, description = "Username already taken"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), Error> {
    let user = accounts::register(&state.db, &state.config, &request.username, &request.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserResponse::from(user),
            message: "Registration successful".to_string(),
        }),
    ))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/authentication/login",
    tag = "authentication",
    summary = "Log in",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; the session cookie is set", body = AuthResponse),
        (status = 401, description = "Invalid username or password"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<LoginResponse, Error> {
    let user = accounts::authenticate(&state.db, &state.config, &request.username, &request.password).await?;

    let current_user = CurrentUser::from(user.clone());
    let token = session::create_session_token(&current_user, &state.config)?;
    let cookie = session::session_cookie(&token, &state.config);

    Ok(LoginResponse {
        auth_response: AuthResponse {
            user: UserResponse::from(user),
            message: "Login successful".to_string(),
        },
        cookie,
    })
}

/// Logout (clear session)
///
/// Always succeeds, with or without a session.
#[utoipa::path(
    post,
    path = "/authentication/logout",
    tag = "authentication",
    summary = "Log out",
    responses(
        (status = 200, description = "Logout successful", body = AuthSuccessResponse),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> LogoutResponse {
    LogoutResponse {
        auth_response: AuthSuccessResponse {
            message: "Logout successful".to_string(),
        },
        cookie: session::expired_session_cookie(&state.config),
    }
}

/// Get the identity of the current session
#[utoipa::path(
    get,
    path = "/authentication/session",
    tag = "authentication",
    summary = "Current session",
    responses(
        (status = 200, description = "The logged-in user", body = CurrentUser),
        (status = 401, description = "No valid session"),
    ),
    security(("CookieAuth" = []))
)]
#[tracing::instrument(skip_all)]
pub async fn get_session(current_user: CurrentUser) -> Json<CurrentUser> {
    Json(current_user)
}
