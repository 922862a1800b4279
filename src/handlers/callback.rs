use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};
use axum_extra::extract::CookieJar;
use chrono::Utc;

use super::session_cookie;
use crate::models::{CallbackParams, SessionClaims};
use crate::{error::ServerError, AppState};

/// Finish the sign-in flow: validate the state parameter against the pending
/// login, exchange the code, normalize the provider profile, and hand the
/// browser its session cookie.
pub async fn oauth_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<CallbackParams>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), ServerError> {
    let csrf_state = params
        .state
        .ok_or_else(|| ServerError::BadRequest("Missing state parameter".to_string()))?;

    // One-time lookup; a replayed or expired state finds nothing
    let pending = state.login_store.take(&csrf_state).ok_or_else(|| {
        ServerError::NotFound("Unknown or expired sign-in attempt".to_string())
    })?;

    let span = tracing::info_span!("oauth_callback", provider = %provider);
    let _enter = span.enter();

    if pending.provider != provider {
        return Err(ServerError::BadRequest(
            "Sign-in attempt does not match provider".to_string(),
        ));
    }

    // Provider declined (user cancelled, consent denied, ...)
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Provider returned an error");

        let query: String = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("error", &error)
            .finish();
        return Ok((jar, Redirect::to(&format!("/login?{}", query))));
    }

    let code = params
        .code
        .ok_or_else(|| ServerError::BadRequest("Missing authorization code".to_string()))?;

    let access_token = state.oauth_client.exchange_code(&provider, &code).await?;
    let profile = state
        .oauth_client
        .fetch_profile(&provider, &access_token)
        .await?;

    // A malformed profile aborts here; no cookie is issued
    let identity = state.oauth_client.normalize(&provider, &profile)?;

    let claims = SessionClaims::issue(
        &identity,
        &access_token,
        profile,
        Utc::now(),
        state.session_signer.ttl_seconds(),
    );
    let token = state.session_signer.issue(&claims)?;

    tracing::info!(user_id = %identity.id, "Sign-in completed");

    let jar = jar.add(session_cookie(token));
    let target = pending.callback_url.as_deref().unwrap_or("/").to_string();

    Ok((jar, Redirect::to(&target)))
}
