use axum::{extract::State, response::Redirect, Json};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::{removal_cookie, session_cookie, SESSION_COOKIE};
use crate::models::SessionResponse;
use crate::{error::ServerError, AppState};

/// Read the session cookie back into a canonical identity. Valid sessions
/// are reissued with fresh timestamps (sliding expiration); anything else
/// reads as anonymous.
pub async fn get_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), ServerError> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok((jar, Json(SessionResponse::anonymous())));
    };

    let Some(claims) = state.session_signer.verify(cookie.value()) else {
        // Stale or tampered cookie; drop it so the browser stops sending it
        let jar = jar.remove(removal_cookie());
        return Ok((jar, Json(SessionResponse::anonymous())));
    };

    let renewed = claims.renew(Utc::now(), state.session_signer.ttl_seconds());
    let token = state.session_signer.issue(&renewed)?;
    let jar = jar.add(session_cookie(token));

    Ok((
        jar,
        Json(SessionResponse {
            user: Some(renewed.identity()),
            expires: renewed.expires_at(),
        }),
    ))
}

/// Clear the session cookie and send the browser back to the root.
pub async fn signout(jar: CookieJar) -> (CookieJar, Redirect) {
    tracing::info!("Signed out");
    (jar.remove(removal_cookie()), Redirect::to("/"))
}
