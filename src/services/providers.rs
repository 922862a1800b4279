use oauth2::{AuthUrl, Scope, TokenUrl};
use serde_json::Value;

use crate::config::{OAuthConfiguration, ProviderCredentials};
use crate::error::ServerError;
use crate::models::ProfileFields;

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";

const NAVER_AUTH_URL: &str = "https://nid.naver.com/oauth2.0/authorize";
const NAVER_TOKEN_URL: &str = "https://nid.naver.com/oauth2.0/token";
const NAVER_USERINFO_URL: &str = "https://openapi.naver.com/v1/nid/me";

/// One configured sign-in provider: its three endpoints, credentials, and the
/// pure mapping function that turns its userinfo payload into profile fields.
pub struct ProviderAdapter {
    pub key: &'static str,
    pub label: &'static str,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub userinfo_url: &'static str,
    pub scopes: Vec<Scope>,
    pub client_id: String,
    pub client_secret: String,
    pub map_profile: fn(&Value) -> Result<ProfileFields, ServerError>,
}

/// The full adapter table. Adding a provider means adding an entry here,
/// never branching elsewhere.
pub fn registry(config: &OAuthConfiguration) -> Result<Vec<ProviderAdapter>, ServerError> {
    Ok(vec![google(&config.google)?, naver(&config.naver)?])
}

fn google(credentials: &ProviderCredentials) -> Result<ProviderAdapter, ServerError> {
    let scopes = if credentials.scopes.is_empty() {
        vec!["openid", "email", "profile"]
            .into_iter()
            .map(|s| Scope::new(s.to_string()))
            .collect()
    } else {
        credentials.scopes.iter().cloned().map(Scope::new).collect()
    };

    Ok(ProviderAdapter {
        key: "google",
        label: "Google",
        auth_url: parse_auth_url(GOOGLE_AUTH_URL)?,
        token_url: parse_token_url(GOOGLE_TOKEN_URL)?,
        userinfo_url: GOOGLE_USERINFO_URL,
        scopes,
        client_id: credentials.client_id.clone(),
        client_secret: credentials.client_secret.clone(),
        map_profile: map_google_profile,
    })
}

fn naver(credentials: &ProviderCredentials) -> Result<ProviderAdapter, ServerError> {
    Ok(ProviderAdapter {
        key: "naver",
        label: "Naver",
        auth_url: parse_auth_url(NAVER_AUTH_URL)?,
        token_url: parse_token_url(NAVER_TOKEN_URL)?,
        userinfo_url: NAVER_USERINFO_URL,
        // Naver's console decides which profile fields are granted; the
        // requested scope list stays operator-configured.
        scopes: credentials.scopes.iter().cloned().map(Scope::new).collect(),
        client_id: credentials.client_id.clone(),
        client_secret: credentials.client_secret.clone(),
        map_profile: map_naver_profile,
    })
}

fn parse_auth_url(url: &str) -> Result<AuthUrl, ServerError> {
    AuthUrl::new(url.to_string())
        .map_err(|e| ServerError::Configuration(format!("Invalid auth URL: {}", e)))
}

fn parse_token_url(url: &str) -> Result<TokenUrl, ServerError> {
    TokenUrl::new(url.to_string())
        .map_err(|e| ServerError::Configuration(format!("Invalid token URL: {}", e)))
}

/// Standard OIDC userinfo document: flat `sub`/`name`/`email`/`picture`.
fn map_google_profile(profile: &Value) -> Result<ProfileFields, ServerError> {
    let id = profile.get("sub").and_then(Value::as_str).unwrap_or_default();
    if id.is_empty() {
        return Err(ServerError::MalformedProfile(
            "userinfo response has no subject".to_string(),
        ));
    }

    Ok(ProfileFields {
        id: id.to_string(),
        name: string_field(profile, "name"),
        email: string_field(profile, "email"),
        image: string_field(profile, "picture"),
    })
}

/// Naver wraps the user payload in an envelope:
/// `{ "resultcode": "00", "response": { "id", "name", "email", "profile_image" } }`.
/// A missing envelope is a hard error, never a silent default.
fn map_naver_profile(profile: &Value) -> Result<ProfileFields, ServerError> {
    let envelope = profile
        .get("response")
        .filter(|v| v.is_object())
        .ok_or_else(|| {
            ServerError::MalformedProfile(
                "userinfo response is missing the 'response' envelope".to_string(),
            )
        })?;

    let id = envelope.get("id").and_then(Value::as_str).unwrap_or_default();
    if id.is_empty() {
        return Err(ServerError::MalformedProfile(
            "'response' envelope has no user id".to_string(),
        ));
    }

    Ok(ProfileFields {
        id: id.to_string(),
        name: string_field(envelope, "name"),
        email: string_field(envelope, "email"),
        image: string_field(envelope, "profile_image"),
    })
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
