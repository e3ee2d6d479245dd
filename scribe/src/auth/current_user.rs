use crate::{
    AppState,
    api::models::users::CurrentUser,
    auth::session,
    errors::{Error, Result},
};
use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::request::Parts,
};
use tracing::{debug, instrument, trace};

/// Extract user from JWT session cookie if present and valid
/// Returns:
/// - None: No session cookie present
/// - Some(Ok(user)): Valid JWT found and verified
/// - Some(Err(error)): Cookie present but expired, forged or malformed
#[instrument(skip(parts, state))]
fn try_jwt_session_auth(parts: &Parts, state: &AppState) -> Option<Result<CurrentUser>> {
    let cookie_name = &state.config.auth.native.session.cookie_name;
    let token = session::session_token_from_headers(&parts.headers, cookie_name)?;
    Some(session::verify_session_token(token, &state.config))
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    #[instrument(skip(parts, state))]
    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        if !state.config.auth.native.enabled {
            trace!("Native authentication disabled; treating request as anonymous");
            return Err(Error::Unauthenticated { message: None });
        }

        match try_jwt_session_auth(parts, state) {
            Some(Ok(user)) => {
                debug!("Found JWT session authenticated user: {}", user.id);
                Ok(user)
            }
            Some(Err(Error::Unauthenticated { .. })) => {
                trace!("JWT session rejected");
                Err(Error::Unauthenticated {
                    message: Some("Session expired or invalid".to_string()),
                })
            }
            Some(Err(e)) => Err(e),
            None => {
                trace!("No authentication credentials found in request");
                Err(Error::Unauthenticated { message: None })
            }
        }
    }
}

/// `Option<CurrentUser>` for routes that render differently for anonymous visitors.
///
/// A missing or invalid session is `None`; only server-side failures reject.
impl OptionalFromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Option<Self>> {
        match <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(Some(user)),
            Err(Error::Unauthenticated { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
