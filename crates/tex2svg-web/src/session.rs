//! Session cookie handling
//!
//! The cookie carries only the [`SessionId`]; everything else lives in the
//! server-side [`tex2svg_core::SessionStore`]. A cookie whose signature does
//! not verify is treated as absent.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tex2svg_core::SessionId;

pub const SESSION_COOKIE: &str = "tex2svg_session";

/// Session id carried by the request, if any
pub fn current(jar: &SignedCookieJar) -> Option<SessionId> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse().ok())
}

/// The request's session id, issuing a new cookie when there is none
pub fn ensure(jar: SignedCookieJar) -> (SignedCookieJar, SessionId) {
    match current(&jar) {
        Some(id) => (jar, id),
        None => {
            let id = SessionId::generate();
            let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax);
            (jar.add(cookie), id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Key;

    #[test]
    fn test_ensure_issues_and_reuses_id() {
        let jar = SignedCookieJar::new(Key::generate());
        assert!(current(&jar).is_none());

        let (jar, id) = ensure(jar);
        assert_eq!(current(&jar), Some(id));

        let (_, again) = ensure(jar);
        assert_eq!(again, id);
    }

    #[test]
    fn test_unsigned_value_is_ignored() {
        let forged = SessionId::generate().to_string();
        let mut headers = axum::http::HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            format!("{}={}", SESSION_COOKIE, forged).parse().unwrap(),
        );
        let jar = SignedCookieJar::from_headers(&headers, Key::generate());

        assert!(current(&jar).is_none());
    }
}
