//! Post creation and deletion for logged-in users.

use crate::auth::Flash;
use crate::error::AppError;
use crate::extractors::{CurrentUser, Session};
use crate::forms::{FormErrors, PostForm};
use crate::models::NewPost;
use crate::service::PostService;
use crate::state::AppState;
use crate::view::{Navigate, Page};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde_json::Value;

const TITLE_TAKEN: &str = "A post with that title already exists.";

fn post_page(session: &Session, status: StatusCode, errors: FormErrors, form: Value) -> Page {
    Page::new("create_post.html", "Create Post", session)
        .status(status)
        .errors(errors)
        .form(form)
}

pub async fn create_post_form(_user: CurrentUser, session: Session) -> Page {
    post_page(&session, StatusCode::OK, FormErrors::default(), Value::Null)
}

pub async fn create_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    session: Session,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let draft = match form.validate() {
        Ok(d) => d,
        Err(errors) => {
            return Ok(post_page(&session, StatusCode::UNPROCESSABLE_ENTITY, errors, form.echo()).into_response())
        }
    };
    let new = NewPost {
        title: draft.title,
        subtitle: draft.subtitle,
        description: draft.description,
        price: Some(draft.price),
        img_url: draft.img_url,
        author_id: user.id,
        categories: draft.categories,
    };
    let post = match PostService::create(&state.pool, &new).await {
        Ok(post) => post,
        Err(e) if e.is_unique_violation() => {
            let mut errors = FormErrors::default();
            errors.add("title", TITLE_TAKEN);
            return Ok(post_page(&session, StatusCode::CONFLICT, errors, form.echo()).into_response());
        }
        Err(e) => return Err(e),
    };
    tracing::info!(post_id = post.id, author_id = user.id, categories = new.categories.len(), "created post");
    Ok(Navigate::to("/").flash(Flash::success("Post created!")).into_response())
}

/// Only the author may delete a post.
pub async fn delete_post(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Navigate, AppError> {
    let post = PostService::find(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("post {}", id)))?;
    if post.author_id != user.id {
        return Err(AppError::Forbidden("only the author can delete this post".into()));
    }
    if !PostService::delete(&state.pool, id).await? {
        return Err(AppError::NotFound(format!("post {}", id)));
    }
    tracing::info!(post_id = id, author_id = user.id, "deleted post");
    Ok(Navigate::to("/").flash(Flash::success("Post deleted.")))
}
