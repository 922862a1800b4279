use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::error::ServerError;
use crate::models::SessionClaims;

/// Mints and verifies the HS256-signed session token carried by the browser.
/// The server holds no session state; the cookie is the session.
pub struct SessionSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: i64,
}

impl SessionSigner {
    pub fn new(secret: &[u8], ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            // Default Validation already checks exp; pin HS256.
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn issue(&self, claims: &SessionClaims) -> Result<String, ServerError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a presented token. Anything unverifiable reads as anonymous;
    /// the reason is logged, never surfaced to the browser.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                let reason = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => "token_expired",
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => "invalid_signature",
                    _ => "invalid_token",
                };
                tracing::debug!(reason, "Rejecting session token");
                None
            }
        }
    }
}
