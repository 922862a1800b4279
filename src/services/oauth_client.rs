use std::collections::HashMap;

use oauth2::{
    basic::BasicClient, AuthorizationCode, ClientId, ClientSecret, CsrfToken, HttpRequest,
    HttpResponse, RedirectUrl, TokenResponse,
};
use rand::Rng;
use serde_json::Value;

use crate::config::{OAuthConfiguration, ServerConfiguration};
use crate::error::ServerError;
use crate::models::CanonicalIdentity;
use crate::services::providers::{self, ProviderAdapter};

// Simple async HTTP client for OAuth2
async fn http_client(request: HttpRequest) -> Result<HttpResponse, reqwest::Error> {
    let client = reqwest::Client::new();
    let mut builder = client
        .request(request.method().clone(), request.uri().to_string())
        .body(request.body().clone());

    for (name, value) in request.headers() {
        builder = builder.header(name.as_str(), value.as_bytes());
    }

    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();

    let mut http_response = HttpResponse::new(body);
    *http_response.status_mut() = status;

    Ok(http_response)
}

/// Runs the authorization-code handshake against whichever registry adapter
/// the request names, and normalizes the resulting userinfo payload.
pub struct OAuthClient {
    providers: HashMap<&'static str, ProviderAdapter>,
    redirect_base: String,
    http_client: reqwest::Client,
}

impl OAuthClient {
    pub fn new(
        oauth: &OAuthConfiguration,
        server: &ServerConfiguration,
    ) -> Result<Self, ServerError> {
        let providers = providers::registry(oauth)?
            .into_iter()
            .map(|adapter| (adapter.key, adapter))
            .collect();

        Ok(Self {
            providers,
            redirect_base: server.public_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
        })
    }

    fn provider(&self, key: &str) -> Result<&ProviderAdapter, ServerError> {
        self.providers
            .get(key)
            .ok_or_else(|| ServerError::NotFound(format!("Unknown sign-in provider '{}'", key)))
    }

    fn redirect_url(&self, adapter: &ProviderAdapter) -> Result<RedirectUrl, ServerError> {
        RedirectUrl::new(format!("{}/auth/callback/{}", self.redirect_base, adapter.key))
            .map_err(|e| ServerError::Configuration(format!("Invalid redirect URI: {}", e)))
    }

    /// Build the provider's authorization URL with a state parameter for CSRF
    /// protection.
    pub fn authorization_url(&self, provider: &str, state: &str) -> Result<String, ServerError> {
        let adapter = self.provider(provider)?;
        let csrf_token = CsrfToken::new(state.to_string());

        let (auth_url, _) = BasicClient::new(ClientId::new(adapter.client_id.clone()))
            .set_client_secret(ClientSecret::new(adapter.client_secret.clone()))
            .set_auth_uri(adapter.auth_url.clone())
            .set_token_uri(adapter.token_url.clone())
            .set_redirect_uri(self.redirect_url(adapter)?)
            .authorize_url(|| csrf_token)
            .add_scopes(adapter.scopes.iter().cloned())
            .url();

        Ok(auth_url.to_string())
    }

    /// Exchange an authorization code for the provider's bearer access token.
    pub async fn exchange_code(&self, provider: &str, code: &str) -> Result<String, ServerError> {
        let adapter = self.provider(provider)?;

        let token_result = BasicClient::new(ClientId::new(adapter.client_id.clone()))
            .set_client_secret(ClientSecret::new(adapter.client_secret.clone()))
            .set_auth_uri(adapter.auth_url.clone())
            .set_token_uri(adapter.token_url.clone())
            .set_redirect_uri(self.redirect_url(adapter)?)
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&http_client)
            .await?;

        tracing::debug!(provider = %adapter.key, "Exchanged authorization code");

        Ok(token_result.access_token().secret().to_string())
    }

    /// Fetch the raw userinfo document with the freshly exchanged token.
    pub async fn fetch_profile(
        &self,
        provider: &str,
        access_token: &str,
    ) -> Result<Value, ServerError> {
        let adapter = self.provider(provider)?;

        let response = self
            .http_client
            .get(adapter.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ServerError::OAuthError(format!("Profile request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ServerError::OAuthError(format!("Profile request rejected: {}", e)))?;

        response
            .json::<Value>()
            .await
            .map_err(|e| ServerError::MalformedProfile(format!("not valid JSON: {}", e)))
    }

    /// Run the adapter's pure mapping function and attach the provider key.
    pub fn normalize(&self, provider: &str, profile: &Value) -> Result<CanonicalIdentity, ServerError> {
        let adapter = self.provider(provider)?;
        let fields = (adapter.map_profile)(profile)?;
        Ok(fields.into_identity(adapter.key))
    }

    /// Generate a random CSRF state token. URL-safe, since it rides in the
    /// authorization redirect's query string.
    pub fn generate_state_token() -> String {
        use base64::Engine;
        let mut rng = rand::rng();
        let random_bytes: Vec<u8> = (0..32).map(|_| rng.random()).collect();
        base64::prelude::BASE64_URL_SAFE_NO_PAD.encode(&random_bytes)
    }
}
