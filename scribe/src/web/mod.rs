//! Server-rendered HTML site.
//!
//! The pages call the same [`crate::service`] operations as the JSON API. They differ from
//! the API only in presentation:
//!
//! - a missing session redirects to `/login` instead of returning 401 (see [`WebUser`])
//! - errors render an HTML page carrying the same status code (see [`PageError`])
//! - successful form posts answer with `303 See Other`

use axum::{
    extract::{FromRequest, FromRequestParts, rejection::FormRejection},
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Redirect, Response},
};
use minijinja::context;

use crate::{AppState, api::models::users::CurrentUser, errors::Error};

pub mod pages;
mod templates;

/// Session identity for pages that need a logged-in user.
///
/// Rejects anonymous visitors with a redirect to the login page.
pub struct WebUser(pub CurrentUser);

impl FromRequestParts<AppState> for WebUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match <CurrentUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await {
            Ok(user) => Ok(WebUser(user)),
            Err(Error::Unauthenticated { .. }) => Err(Redirect::to("/login").into_response()),
            Err(e) => Err(PageError::from(e).into_response()),
        }
    }
}

/// [`axum::Form`] whose rejection renders the error page with `400 Bad Request`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Form), rejection(PageError))]
pub struct WebForm<T>(pub T);

/// An [`Error`] rendered as an HTML page.
#[derive(Debug)]
pub struct PageError {
    error: Error,
    current_user: Option<CurrentUser>,
}

impl From<Error> for PageError {
    fn from(error: Error) -> Self {
        Self {
            error,
            current_user: None,
        }
    }
}

impl From<FormRejection> for PageError {
    fn from(rejection: FormRejection) -> Self {
        Error::from(rejection).into()
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.log();
        let status = self.error.status_code();
        let message = self.error.user_message();

        let rendered = templates::render(
            "error.html",
            context! {
                status => status_line(status),
                message => &message,
                current_user => self.current_user,
            },
        );
        match rendered {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                e.log();
                (status, message).into_response()
            }
        }
    }
}

fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}

/// Attach the acting user to a failed operation so the error page keeps the signed-in navigation.
pub trait PageResultExt<T> {
    fn for_user(self, user: &CurrentUser) -> Result<T, PageError>;
}

impl<T> PageResultExt<T> for Result<T, Error> {
    fn for_user(self, user: &CurrentUser) -> Result<T, PageError> {
        self.map_err(|error| PageError {
            error,
            current_user: Some(user.clone()),
        })
    }
}

/// Render a template into a `200 OK` page.
pub(crate) fn page(name: &str, ctx: minijinja::Value) -> Result<Html<String>, PageError> {
    Ok(Html(templates::render(name, ctx)?))
}
