use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;
use uuid::Uuid;

use crate::error::ApiError;

/// Name of the cookie carrying the anonymous session identifier.
pub const SESSION_COOKIE: &str = "sessionId";

/// How long a minted session cookie stays valid on the client.
const SESSION_TTL: Duration = Duration::days(7);

/// Extracts the session identifier from the request's `sessionId` cookie.
///
/// Routes that read ledger data take this as a parameter; a request without
/// the cookie (or with one that is not a UUID) is rejected with 401 before the
/// handler body runs. The value is an opaque bearer token, not authentication:
/// any UUID grants access to that session's rows.
#[derive(Debug)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        session_from_jar(&jar).map(SessionId).ok_or(ApiError::Unauthorized)
    }
}

/// Non-rejecting read of the session cookie, for the create route.
pub fn session_from_jar(jar: &CookieJar) -> Option<Uuid> {
    jar.get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Builds the cookie handed to a client the first time it records a
/// transaction, so follow-up requests land in the same session.
pub fn session_cookie(session_id: Uuid) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .max_age(SESSION_TTL)
        .build()
}
