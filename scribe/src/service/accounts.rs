//! Registration and credential checks.

use sqlx::SqlitePool;
use tracing::instrument;

use crate::{
    auth::password,
    config::{Config, PasswordConfig},
    db::{
        errors::DbError,
        handlers::{Repository, Users},
        models::users::{UserCreateDBRequest, UserDBResponse},
    },
    errors::{Error, Result},
};

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 80;

/// Trim and check a username, returning the form that is stored and looked up.
pub fn normalize_username(username: &str) -> Result<&str> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(Error::validation(format!(
            "Username must be no more than {MAX_USERNAME_LENGTH} characters"
        )));
    }
    Ok(username)
}

pub fn validate_password(password: &str, rules: &PasswordConfig) -> Result<()> {
    let length = password.chars().count();
    if length < rules.min_length {
        return Err(Error::validation(format!(
            "Password must be at least {} characters",
            rules.min_length
        )));
    }
    if length > rules.max_length {
        return Err(Error::validation(format!(
            "Password must be no more than {} characters",
            rules.max_length
        )));
    }
    Ok(())
}

fn ensure_native_auth(config: &Config) -> Result<()> {
    if config.auth.native.enabled {
        Ok(())
    } else {
        Err(Error::validation("Native authentication is disabled"))
    }
}

/// Create a new account. Does not log the user in.
#[instrument(skip(db, config, password), err)]
pub async fn register(db: &SqlitePool, config: &Config, username: &str, password: &str) -> Result<UserDBResponse> {
    ensure_native_auth(config)?;
    if !config.auth.native.allow_registration {
        return Err(Error::validation("User registration is disabled"));
    }

    let username = normalize_username(username)?;
    validate_password(password, &config.auth.native.password)?;

    let mut conn = db.acquire().await.map_err(DbError::from)?;
    let mut users = Users::new(&mut conn);

    if users.get_user_by_username(username).await?.is_some() {
        return Err(Error::DuplicateUsername {
            username: username.to_string(),
        });
    }

    let password_hash = password::hash_password_blocking(password.to_string(), config.auth.native.password.argon2_params()).await?;

    // The unique index catches a concurrent registration that passed the check above
    users
        .create(&UserCreateDBRequest {
            username: username.to_string(),
            password_hash,
        })
        .await
        .map_err(|e| {
            if e.is_unique_violation_on("users", "username") {
                Error::DuplicateUsername {
                    username: username.to_string(),
                }
            } else {
                Error::Database(e)
            }
        })
}

/// Check a username/password pair.
///
/// Unknown usernames and wrong passwords both yield [`Error::InvalidCredentials`], and both
/// cost one Argon2 computation.
#[instrument(skip(db, config, password), err)]
pub async fn authenticate(db: &SqlitePool, config: &Config, username: &str, password: &str) -> Result<UserDBResponse> {
    ensure_native_auth(config)?;

    let mut conn = db.acquire().await.map_err(DbError::from)?;
    let user = Users::new(&mut conn).get_user_by_username(username.trim()).await?;
    drop(conn);

    let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
    let is_valid = password::verify_login_blocking(
        password.to_string(),
        stored_hash,
        config.auth.native.password.argon2_params(),
    )
    .await?;

    match user {
        Some(user) if is_valid => Ok(user),
        _ => Err(Error::InvalidCredentials),
    }
}
