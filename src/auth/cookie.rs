//! Cookie header reading and `Set-Cookie` construction.

use axum::http::{header::COOKIE, HeaderMap};
use std::time::Duration;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Value of cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

/// `Set-Cookie` value. Without `max_age` the cookie lasts for the browser session.
pub fn set_cookie(name: &str, value: &str, max_age: Option<Duration>, secure: bool) -> String {
    let mut cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", name, value);
    if let Some(age) = max_age {
        cookie.push_str(&format!("; Max-Age={}", age.as_secs()));
    }
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_named_cookie_among_several() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, "theme=dark; session=abc.def".parse().unwrap());
        headers.append(COOKIE, "flash=xyz".parse().unwrap());
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), Some("abc.def"));
        assert_eq!(read_cookie(&headers, FLASH_COOKIE), Some("xyz"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn set_cookie_attributes() {
        assert_eq!(
            set_cookie("session", "t", None, false),
            "session=t; Path=/; HttpOnly; SameSite=Lax"
        );
        assert_eq!(
            set_cookie("session", "t", Some(Duration::from_secs(60)), true),
            "session=t; Path=/; HttpOnly; SameSite=Lax; Max-Age=60; Secure"
        );
        assert!(clear_cookie("flash").ends_with("Max-Age=0"));
    }
}
