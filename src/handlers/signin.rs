use axum::{
    extract::{Path, Query, State},
    response::Redirect,
};

use crate::models::SigninParams;
use crate::services::OAuthClient;
use crate::{error::ServerError, AppState};

/// Start the sign-in flow: record a pending login keyed by a fresh CSRF
/// state token and bounce the browser to the provider's authorization page.
pub async fn signin(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Query(params): Query<SigninParams>,
) -> Result<Redirect, ServerError> {
    let span = tracing::info_span!("signin", provider = %provider);
    let _enter = span.enter();

    let csrf_state = OAuthClient::generate_state_token();

    // Unknown provider keys fail here, before anything is stored
    let auth_url = state.oauth_client.authorization_url(&provider, &csrf_state)?;

    // Only same-site targets; anything else falls back to the root
    let callback_url = params
        .callback_url
        .filter(|url| url.starts_with('/') && !url.starts_with("//"));

    state
        .login_store
        .insert(csrf_state, provider.clone(), callback_url);

    tracing::info!("Initiated sign-in");

    Ok(Redirect::to(&auth_url))
}
