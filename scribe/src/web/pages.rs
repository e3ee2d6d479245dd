//! HTML page handlers.

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use minijinja::context;

use super::{PageError, PageResultExt, WebForm, WebUser, page, templates};
use crate::{
    AppState,
    api::models::{
        auth::{LoginRequest, RegisterRequest},
        posts::{PostCreate, PostResponse, PostUpdate},
        users::CurrentUser,
    },
    auth::session,
    db::handlers::posts::PostFilter,
    errors::Error,
    service::{accounts, posts as post_service},
    types::PostId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/create", get(create_form).post(create))
        .route("/blog/{blog_id}", get(view_post))
        .route("/edit/{blog_id}", get(edit_form).post(edit))
        .route("/delete/{blog_id}", post(delete))
}

/// Re-render a form with the error message and the error's status code.
fn form_with_error(name: &str, error: &Error, ctx: minijinja::Value) -> Result<Response, PageError> {
    error.log();
    let ctx = context! { error => error.user_message(), ..ctx };
    let html = templates::render(name, ctx)?;
    Ok((error.status_code(), Html(html)).into_response())
}

fn redirect_with_cookie(to: &str, cookie: &str) -> Result<Response, PageError> {
    let value = HeaderValue::from_str(cookie).map_err(|e| Error::Internal {
        operation: format!("build session cookie header: {e}"),
    })?;
    Ok(([(header::SET_COOKIE, value)], Redirect::to(to)).into_response())
}

#[tracing::instrument(skip_all)]
async fn home(State(state): State<AppState>, current_user: Option<CurrentUser>) -> Result<Html<String>, PageError> {
    let Some(user) = current_user else {
        return page("index.html", context! {});
    };

    let (posts, _) = post_service::list_posts(&state.db, &PostFilter::default()).await.for_user(&user)?;
    let posts: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    page("index.html", context! { current_user => user, posts => posts })
}

async fn register_form() -> Result<Html<String>, PageError> {
    page("register.html", context! { username => "" })
}

#[tracing::instrument(skip_all)]
async fn register(
    State(state): State<AppState>,
    WebForm(form): WebForm<RegisterRequest>,
) -> Result<Response, PageError> {
    match accounts::register(&state.db, &state.config, &form.username, &form.password).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(e @ (Error::Validation { .. } | Error::DuplicateUsername { .. })) => {
            form_with_error("register.html", &e, context! { username => form.username })
        }
        Err(e) => Err(e.into()),
    }
}

async fn login_form() -> Result<Html<String>, PageError> {
    page("login.html", context! { username => "" })
}

#[tracing::instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    WebForm(form): WebForm<LoginRequest>,
) -> Result<Response, PageError> {
    let user = match accounts::authenticate(&state.db, &state.config, &form.username, &form.password).await {
        Ok(user) => user,
        Err(e @ Error::InvalidCredentials) => {
            return form_with_error("login.html", &e, context! { username => form.username });
        }
        Err(e) => return Err(e.into()),
    };

    let token = session::create_session_token(&CurrentUser::from(user), &state.config)?;
    redirect_with_cookie("/", &session::session_cookie(&token, &state.config))
}

#[tracing::instrument(skip_all)]
async fn logout(State(state): State<AppState>) -> Result<Response, PageError> {
    redirect_with_cookie("/", &session::expired_session_cookie(&state.config))
}

async fn create_form(WebUser(user): WebUser) -> Result<Html<String>, PageError> {
    page(
        "post_form.html",
        context! { current_user => user, heading => "New post", action => "/create", title => "", content => "" },
    )
}

#[tracing::instrument(skip_all, fields(user_id = user.id))]
async fn create(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    WebForm(form): WebForm<PostCreate>,
) -> Result<Response, PageError> {
    match post_service::create_post(&state.db, &user, &form.title, &form.content).await {
        Ok(post) => Ok(Redirect::to(&format!("/blog/{}", post.id)).into_response()),
        Err(e @ Error::Validation { .. }) => form_with_error(
            "post_form.html",
            &e,
            context! {
                current_user => user,
                heading => "New post",
                action => "/create",
                title => form.title,
                content => form.content,
            },
        ),
        Err(e) => Err(e).for_user(&user),
    }
}

#[tracing::instrument(skip_all, fields(user_id = user.id, post_id = blog_id))]
async fn view_post(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(blog_id): Path<PostId>,
) -> Result<Html<String>, PageError> {
    let post = post_service::get_post(&state.db, blog_id).await.for_user(&user)?;
    page("post.html", context! { current_user => user, post => PostResponse::from(post) })
}

#[tracing::instrument(skip_all, fields(user_id = user.id, post_id = blog_id))]
async fn edit_form(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(blog_id): Path<PostId>,
) -> Result<Html<String>, PageError> {
    let post = post_service::get_post_for_edit(&state.db, &user, blog_id).await.for_user(&user)?;
    page(
        "post_form.html",
        context! {
            current_user => user,
            heading => "Edit post",
            action => format!("/edit/{blog_id}"),
            title => post.title,
            content => post.content,
        },
    )
}

#[tracing::instrument(skip_all, fields(user_id = user.id, post_id = blog_id))]
async fn edit(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(blog_id): Path<PostId>,
    WebForm(form): WebForm<PostUpdate>,
) -> Result<Response, PageError> {
    match post_service::update_post(&state.db, &user, blog_id, &form.title, &form.content).await {
        Ok(post) => Ok(Redirect::to(&format!("/blog/{}", post.id)).into_response()),
        Err(e @ Error::Validation { .. }) => form_with_error(
            "post_form.html",
            &e,
            context! {
                current_user => user,
                heading => "Edit post",
                action => format!("/edit/{blog_id}"),
                title => form.title,
                content => form.content,
            },
        ),
        Err(e) => Err(e).for_user(&user),
    }
}

#[tracing::instrument(skip_all, fields(user_id = user.id, post_id = blog_id))]
async fn delete(
    State(state): State<AppState>,
    WebUser(user): WebUser,
    Path(blog_id): Path<PostId>,
) -> Result<Redirect, PageError> {
    post_service::delete_post(&state.db, &user, blog_id).await.for_user(&user)?;
    Ok(Redirect::to("/"))
}
