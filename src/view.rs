//! Server-rendered pages as view models, and redirects that carry cookies.
//!
//! A `Page` names its template and carries everything the template needs
//! (current user, flashes, form errors, refill values, data). The body is the
//! JSON view model; turning it into HTML is up to the template renderer.

use crate::auth::{clear_cookie, set_cookie, Flash, FLASH_COOKIE};
use crate::error::AppError;
use crate::extractors::Session;
use crate::forms::FormErrors;
use crate::models::UserSummary;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct PageBody<'a> {
    template: &'static str,
    title: &'static str,
    current_user: Option<&'a UserSummary>,
    flashes: &'a [Flash],
    errors: &'a FormErrors,
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<&'a Value>,
    data: &'a Value,
}

pub struct Page {
    template: &'static str,
    title: &'static str,
    status: StatusCode,
    current_user: Option<UserSummary>,
    flashes: Vec<Flash>,
    /// The request arrived with a flash cookie that this page displays.
    consumes_flash_cookie: bool,
    errors: FormErrors,
    form: Value,
    data: Value,
}

impl Page {
    pub fn new(template: &'static str, title: &'static str, session: &Session) -> Self {
        Page {
            template,
            title,
            status: StatusCode::OK,
            current_user: session.user.as_ref().map(UserSummary::from),
            consumes_flash_cookie: !session.flashes.is_empty(),
            flashes: session.flashes.clone(),
            errors: FormErrors::default(),
            form: Value::Null,
            data: Value::Null,
        }
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    pub fn errors(mut self, errors: FormErrors) -> Self {
        self.errors = errors;
        self
    }

    /// Values to refill the form with.
    pub fn form(mut self, form: Value) -> Self {
        self.form = form;
        self
    }

    pub fn data<T: Serialize>(mut self, data: &T) -> Result<Self, AppError> {
        self.data = serde_json::to_value(data).map_err(|e| AppError::Internal(format!("view model: {}", e)))?;
        Ok(self)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let body = PageBody {
            template: self.template,
            title: self.title,
            current_user: self.current_user.as_ref(),
            flashes: &self.flashes,
            errors: &self.errors,
            form: Some(&self.form).filter(|f| !f.is_null()),
            data: &self.data,
        };
        let mut response = (self.status, Json(body)).into_response();
        if self.consumes_flash_cookie {
            append_cookie(&mut response, clear_cookie(FLASH_COOKIE));
        }
        response
    }
}

/// 303 See Other to a local path, optionally setting cookies and queueing flashes
/// for the next page.
pub struct Navigate {
    location: String,
    cookies: Vec<String>,
    flashes: Vec<Flash>,
}

impl Navigate {
    pub fn to(location: impl Into<String>) -> Self {
        Navigate {
            location: location.into(),
            cookies: Vec::new(),
            flashes: Vec::new(),
        }
    }

    pub fn cookie(mut self, cookie: String) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }
}

impl IntoResponse for Navigate {
    fn into_response(self) -> Response {
        let mut response = StatusCode::SEE_OTHER.into_response();
        match HeaderValue::try_from(self.location.as_str()) {
            Ok(v) => {
                response.headers_mut().insert(header::LOCATION, v);
            }
            Err(_) => {
                tracing::warn!(location = %self.location, "unencodable redirect target, using /");
                response.headers_mut().insert(header::LOCATION, HeaderValue::from_static("/"));
            }
        }
        for cookie in self.cookies {
            append_cookie(&mut response, cookie);
        }
        if !self.flashes.is_empty() {
            append_cookie(&mut response, set_cookie(FLASH_COOKIE, &Flash::encode(&self.flashes), None, false));
        }
        response
    }
}

fn append_cookie(response: &mut Response, cookie: String) {
    match HeaderValue::try_from(cookie) {
        Ok(v) => {
            response.headers_mut().append(header::SET_COOKIE, v);
        }
        Err(e) => tracing::warn!(error = %e, "dropped unencodable cookie"),
    }
}

/// `next` only when it is a path on this site. Browsers drop tabs and newlines
/// from URLs before parsing, so any control character disqualifies it.
pub fn safe_next(next: Option<&str>) -> Option<&str> {
    next.filter(|n| {
        n.starts_with('/') && !n.starts_with("//") && !n.starts_with("/\\") && !n.chars().any(char::is_control)
    })
}
