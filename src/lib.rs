pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Configuration;
pub use error::ServerError;

use axum::{
    routing::{get, post},
    Router,
};
use services::{BackendClient, LoginStore, OAuthClient, SessionSigner};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub oauth_client: Arc<OAuthClient>,
    pub login_store: Arc<LoginStore>,
    pub session_signer: Arc<SessionSigner>,
    pub backend: Arc<BackendClient>,
}

impl AppState {
    pub fn from_configuration(configuration: &Configuration) -> Result<Self, ServerError> {
        Ok(Self {
            oauth_client: Arc::new(OAuthClient::new(&configuration.oauth, &configuration.server)?),
            login_store: Arc::new(LoginStore::new(configuration.server.login_ttl_seconds)),
            session_signer: Arc::new(SessionSigner::new(
                configuration.session.secret.as_bytes(),
                configuration.session.ttl_seconds,
            )),
            backend: Arc::new(BackendClient::new(configuration.backend.url.clone())),
        })
    }
}

/// Build the portal router. Shared between the binary and the integration tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page))
        .route("/api/health", get(handlers::health_check))
        .route("/auth/signin/{provider}", get(handlers::signin))
        .route("/auth/callback/{provider}", get(handlers::oauth_callback))
        .route("/auth/session", get(handlers::get_session))
        .route("/auth/signout", post(handlers::signout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
