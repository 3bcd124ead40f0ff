//! Registration, login and logout.

use crate::auth::{clear_cookie, hash_password, set_cookie, verify_password, Flash, SESSION_COOKIE};
use crate::error::AppError;
use crate::extractors::Session;
use crate::forms::{FormErrors, LoginForm, RegistrationForm};
use crate::models::{NewUser, User};
use crate::service::UserService;
use crate::state::AppState;
use crate::view::{safe_next, Navigate, Page};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

pub const LOGIN_FAILED: &str = "Login Unsuccessful. Please check username and password";
const EMAIL_TAKEN: &str = "That email is taken. Please choose a different one.";

#[derive(Debug, Default, Deserialize)]
pub struct NextParam {
    pub next: Option<String>,
}

/// `Set-Cookie` value for a fresh session. A remembered session persists for the
/// remember TTL; otherwise the cookie lasts for the browser session.
fn session_cookie(state: &AppState, user: &User, remember: bool) -> Result<String, AppError> {
    let ttl: Duration = if remember {
        state.settings.remember_ttl
    } else {
        state.settings.session_ttl
    };
    let token = state.keys.issue(user.id, ttl)?;
    let max_age = remember.then_some(ttl);
    Ok(set_cookie(SESSION_COOKIE, &token, max_age, state.settings.secure_cookies))
}

fn register_page(session: &Session, status: StatusCode, errors: FormErrors, form: Value) -> Page {
    Page::new("register.html", "Register", session)
        .status(status)
        .errors(errors)
        .form(form)
}

pub async fn register_form(session: Session) -> Response {
    if session.is_authenticated() {
        return Navigate::to("/").into_response();
    }
    register_page(&session, StatusCode::OK, FormErrors::default(), Value::Null).into_response()
}

pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegistrationForm>,
) -> Result<Response, AppError> {
    if session.is_authenticated() {
        return Ok(Navigate::to("/").into_response());
    }
    let registration = match form.validate() {
        Ok(r) => r,
        Err(errors) => {
            return Ok(register_page(&session, StatusCode::UNPROCESSABLE_ENTITY, errors, form.echo()).into_response())
        }
    };
    let email_taken = || {
        let mut errors = FormErrors::default();
        errors.add("email", EMAIL_TAKEN);
        register_page(&session, StatusCode::CONFLICT, errors, form.echo())
            .flash(Flash::danger(EMAIL_TAKEN))
            .into_response()
    };
    if UserService::email_taken(&state.pool, &registration.email).await? {
        return Ok(email_taken());
    }
    let password_hash = hash_password(registration.password, state.settings.bcrypt_cost).await?;
    let new = NewUser {
        name: registration.username,
        email: registration.email,
        password_hash,
    };
    let user = match UserService::create(&state.pool, &new).await {
        Ok(user) => user,
        Err(e) if e.is_unique_violation() => return Ok(email_taken()),
        Err(e) => return Err(e),
    };
    tracing::info!(user_id = user.id, "registered user");
    let cookie = session_cookie(&state, &user, false)?;
    Ok(Navigate::to("/")
        .cookie(cookie)
        .flash(Flash::success(format!("Account created for {}!", user.name)))
        .into_response())
}

fn login_page(session: &Session, status: StatusCode, errors: FormErrors, form: Value) -> Page {
    Page::new("login.html", "LogIn", session)
        .status(status)
        .errors(errors)
        .form(form)
}

pub async fn login_form(session: Session) -> Response {
    if session.is_authenticated() {
        return Navigate::to("/").into_response();
    }
    login_page(&session, StatusCode::OK, FormErrors::default(), Value::Null).into_response()
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Query(next): Query<NextParam>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if session.is_authenticated() {
        return Ok(Navigate::to("/").into_response());
    }
    let credentials = match form.validate() {
        Ok(c) => c,
        Err(errors) => {
            return Ok(login_page(&session, StatusCode::UNPROCESSABLE_ENTITY, errors, form.echo()).into_response())
        }
    };
    let user = UserService::find_by_email(&state.pool, &credentials.email).await?;
    let matched = match &user {
        Some(u) => verify_password(credentials.password.clone(), u.password.clone()).await?,
        None => false,
    };
    let user = match user {
        Some(u) if matched => u,
        _ => {
            tracing::warn!("failed login attempt");
            return Ok(login_page(&session, StatusCode::UNAUTHORIZED, FormErrors::default(), form.echo())
                .flash(Flash::danger(LOGIN_FAILED))
                .into_response());
        }
    };
    tracing::info!(user_id = user.id, remember = credentials.remember, "user logged in");
    let cookie = session_cookie(&state, &user, credentials.remember)?;
    let target = safe_next(next.next.as_deref()).unwrap_or("/");
    Ok(Navigate::to(target).cookie(cookie).into_response())
}

pub async fn logout(session: Session) -> Navigate {
    if let Some(user) = &session.user {
        tracing::info!(user_id = user.id, "user logged out");
    }
    Navigate::to("/")
        .cookie(clear_cookie(SESSION_COOKIE))
        .flash(Flash::info("You have been logged out."))
}
