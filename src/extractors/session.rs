//! Resolve the session cookie to the logged-in user, once per request.

use crate::auth::{read_cookie, Flash, FLASH_COOKIE, SESSION_COOKIE};
use crate::error::AppError;
use crate::models::User;
use crate::service::UserService;
use crate::state::AppState;
use crate::view::Navigate;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const LOGIN_REQUIRED: &str = "Please log in to access this page.";

/// The requesting user (if any) and the flashes queued for this page.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub user: Option<User>,
    pub flashes: Vec<Flash>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    async fn load(parts: &Parts, state: &AppState) -> Result<Self, AppError> {
        let flashes = read_cookie(&parts.headers, FLASH_COOKIE)
            .map(Flash::decode)
            .unwrap_or_default();
        let user_id = read_cookie(&parts.headers, SESSION_COOKIE)
            .filter(|t| !t.is_empty())
            .and_then(|t| state.keys.verify(t));
        let user = match user_id {
            Some(id) => {
                let user = UserService::find_by_id(&state.pool, id).await?;
                if user.is_none() {
                    tracing::warn!(user_id = id, "session names a user that no longer exists");
                }
                user
            }
            None => None,
        };
        Ok(Session { user, flashes })
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }
        let session = Session::load(parts, state).await?;
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

/// A logged-in user. Anonymous requests are sent to the login page with a `next`
/// link back to where they were going.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;
        match session.user {
            Some(user) => Ok(CurrentUser(user)),
            None => {
                let next = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                let location = format!("/login?next={}", urlencoding::encode(next));
                Err(Navigate::to(location)
                    .flash(Flash::info(LOGIN_REQUIRED))
                    .into_response())
            }
        }
    }
}

/// Middleware for JSON routes: anonymous requests get 401.
pub async fn require_user(State(state): State<AppState>, request: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let session = Session::from_request_parts(&mut parts, &state).await?;
    if !session.is_authenticated() {
        return Err(AppError::Unauthorized("login required".into()));
    }
    Ok(next.run(Request::from_parts(parts, body)).await)
}
