// src/web/csrf.rs
//
// Double-submit check for the view server's own forms. Every page renders the
// `csrftoken` cookie into a hidden field; a mutating post is accepted only when
// the field it carries equals the cookie it carries. A cross-site form gets the
// cookie sent along but cannot read it to fill in the field.
use crate::{
    api::{RequestContext, CSRF_COOKIE},
    error::{AppError, AppResult},
};
use tower_cookies::Cookies;

/// Name of the hidden form field carrying the token back.
pub const CSRF_FIELD: &str = "csrf_token";

/// The browser's `csrftoken` cookie, or an empty string when it sent none.
pub fn cookie_token(cookies: &Cookies) -> String {
    cookies
        .get(CSRF_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

/// Builds the request context for a mutating call, once the submitted field
/// matches the cookie. Without a cookie the field must be empty too, and the
/// backend receives an empty token.
pub fn verified_context(cookies: &Cookies, submitted: &str) -> AppResult<RequestContext> {
    let token = cookie_token(cookies);
    if !tokens_match(&token, submitted) {
        tracing::warn!("Rejected post: {} field does not match {} cookie", CSRF_FIELD, CSRF_COOKIE);
        return Err(AppError::CsrfMismatch);
    }
    if token.is_empty() {
        tracing::debug!("No {} cookie on request, sending empty token", CSRF_COOKIE);
    }
    Ok(RequestContext::with_csrf_token(token))
}

// Compares every byte so timing does not reveal the matching prefix
fn tokens_match(cookie: &str, submitted: &str) -> bool {
    cookie.len() == submitted.len()
        && cookie
            .bytes()
            .zip(submitted.bytes())
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_must_match_exactly() {
        assert!(tokens_match("abc123", "abc123"));
        assert!(tokens_match("", ""));
        assert!(!tokens_match("abc123", ""));
        assert!(!tokens_match("abc123", "abc124"));
        assert!(!tokens_match("abc", "abc123"));
        assert!(!tokens_match("", "forged"));
    }
}
