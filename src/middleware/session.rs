use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::header::{AUTHORIZATION, COOKIE};
use tracing::debug;

use crate::auth::jwt::verify_token;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Clone, Debug)]
pub struct SessionContext {
    pub email: String,
    pub display_name: String,
}

/// Request extension set by [`load_session`] on every request.
#[derive(Clone, Debug, Default)]
pub struct CurrentSession(pub Option<SessionContext>);

fn cookie_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value)
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

fn decode(token: &str, secret: &str) -> Option<SessionContext> {
    if token.is_empty() {
        return None;
    }
    match verify_token(token, secret) {
        Ok(claims) => Some(SessionContext {
            email: claims.sub,
            display_name: claims.name,
        }),
        Err(e) => {
            debug!(error = %e, "Ignoring session token");
            None
        }
    }
}

/// Decodes the session cookie, falling back to the bearer token when the
/// cookie is absent or does not verify. A missing, invalid or expired token
/// leaves the request signed out; nothing is rejected.
pub async fn load_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let secret = &state.settings.jwt_secret;
    let session = cookie_token(&req)
        .and_then(|token| decode(token, secret))
        .or_else(|| bearer_token(&req).and_then(|token| decode(token, secret)));

    req.extensions_mut().insert(CurrentSession(session));
    next.run(req).await
}

pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_session_among_other_cookies() {
        let req = Request::builder()
            .header(COOKIE, "theme=dark; session=abc.def.ghi; other=1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(cookie_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn reads_bearer_header() {
        let req = Request::builder()
            .header(AUTHORIZATION, "Bearer tok")
            .body(Body::empty())
            .unwrap();
        assert_eq!(bearer_token(&req), Some("tok"));
        assert_eq!(cookie_token(&req), None);
    }
}
