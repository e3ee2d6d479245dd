//! OpenAPI documentation for the JSON API at `/api/v1/*`.
//!
//! The document is served at `/api/openapi.json` and rendered with Scalar at
//! `/api/docs`.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::api;

/// Name of the session cookie documented for `CookieAuth`.
///
/// The running server uses `auth.native.session.cookie_name`, which defaults to this.
const DOCUMENTED_COOKIE_NAME: &str = "scribe_session";

/// Security scheme for the session cookie set by `POST /authentication/login`.
struct CookieSecurityAddon;

impl Modify for CookieSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "CookieAuth".to_string(),
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    DOCUMENTED_COOKIE_NAME,
                    "Signed session token issued at login. Browsers send it automatically; \
                     other clients must replay the `Set-Cookie` value from the login response.",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    servers(
        (url = "/api/v1", description = "Scribe JSON API")
    ),
    modifiers(&CookieSecurityAddon),
    paths(
        api::handlers::auth::register,
        api::handlers::auth::login,
        api::handlers::auth::logout,
        api::handlers::auth::get_session,
        api::handlers::posts::list_posts,
        api::handlers::posts::create_post,
        api::handlers::posts::get_post,
        api::handlers::posts::update_post,
        api::handlers::posts::delete_post,
    ),
    components(
        schemas(
            api::models::auth::RegisterRequest,
            api::models::auth::LoginRequest,
            api::models::auth::AuthResponse,
            api::models::auth::AuthSuccessResponse,
            api::models::users::UserResponse,
            api::models::users::CurrentUser,
            api::models::posts::PostCreate,
            api::models::posts::PostUpdate,
            api::models::posts::PostResponse,
        )
    ),
    tags(
        (name = "authentication", description = "Register, log in and out, and inspect the current session."),
        (name = "posts", description = "Read any post; create, edit and delete your own."),
    ),
    info(
        title = "Scribe API",
        version = "1.0.0",
        description = "JSON API for the Scribe blogging service.

## Authentication

Log in with `POST /authentication/login`. The response sets an HTTP-only session cookie
that authenticates every other endpoint except registration and logout.

## Errors

Errors are returned as plain text with a matching status code:

- `400` invalid input
- `401` missing session or bad credentials
- `403` not the author of the post
- `404` unknown post
- `409` username already taken",
    ),
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/authentication/register",
            "/authentication/login",
            "/authentication/logout",
            "/authentication/session",
            "/posts",
            "/posts/{id}",
        ] {
            assert!(paths.contains(&expected), "missing path {expected}");
        }
    }

    #[test]
    fn test_cookie_auth_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("CookieAuth"));
    }
}
