//! Double-submit token for the contact form.
//!
//! The token travels twice: in a signed cookie and in the hidden
//! `csrf_token` input. A submission is accepted only when both agree.

use actix_web::{
    cookie::{Cookie, Key},
    HttpRequest,
};
use uuid::Uuid;

use crate::util::signed_cookie;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_FIELD: &str = "csrf_token";

pub const MISSING_MESSAGE: &str = "The CSRF token is missing.";
pub const INVALID_MESSAGE: &str = "The CSRF token is invalid.";

/// The token the client currently holds, or a fresh one with the cookie to set.
pub fn current_or_issue(req: &HttpRequest, key: &Key) -> (String, Option<Cookie<'static>>) {
    match read(req, key) {
        Some(token) => (token, None),
        None => {
            let token = Uuid::new_v4().simple().to_string();
            let cookie = signed_cookie::sign(CSRF_COOKIE, &token, key);
            (token, Some(cookie))
        }
    }
}

pub fn read(req: &HttpRequest, key: &Key) -> Option<String> {
    signed_cookie::verified_value(req, CSRF_COOKIE, key).filter(|token| !token.is_empty())
}

/// Compares the submitted token with the cookie's; `None` means they match.
pub fn check(expected: Option<&str>, submitted: &str) -> Option<&'static str> {
    let submitted = submitted.trim();
    if submitted.is_empty() {
        return Some(MISSING_MESSAGE);
    }
    match expected {
        Some(expected) if expected.len() == submitted.len() && constant_eq(expected, submitted) => {
            None
        }
        _ => Some(INVALID_MESSAGE),
    }
}

fn constant_eq(a: &str, b: &str) -> bool {
    a.bytes().zip(b.bytes()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
