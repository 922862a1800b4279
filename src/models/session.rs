use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CanonicalIdentity;

/// Claims carried by the signed session cookie.
///
/// Issued once at sign-in, then reissued (never mutated) on every successful
/// session read. The raw provider payload rides along opaquely so
/// provider-specific fields survive even though the canonical shape drops
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Provider-scoped user id.
    pub sub: String,
    /// Registry key of the provider that authenticated the user.
    pub provider: String,
    /// Bearer token issued by the provider at code exchange.
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// Raw provider profile, carried verbatim.
    pub profile: serde_json::Value,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl SessionClaims {
    /// Merge the sign-in exchange artifacts into a fresh token.
    pub fn issue(
        identity: &CanonicalIdentity,
        access_token: &str,
        profile: serde_json::Value,
        now: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Self {
        let iat = now.timestamp();
        Self {
            sub: identity.id.clone(),
            provider: identity.provider.clone(),
            access_token: access_token.to_string(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            picture: identity.image.clone(),
            profile,
            iat,
            exp: iat + ttl_seconds,
        }
    }

    /// Produce the reissued token for a validated session read. Identity and
    /// provider credentials carry over; only the timestamps move.
    pub fn renew(&self, now: DateTime<Utc>, ttl_seconds: i64) -> Self {
        let iat = now.timestamp();
        Self {
            iat,
            exp: iat + ttl_seconds,
            ..self.clone()
        }
    }

    /// Derive the canonical identity this token vouches for: the id comes
    /// from the subject, the provider key is copied across verbatim.
    pub fn identity(&self) -> CanonicalIdentity {
        CanonicalIdentity {
            id: self.sub.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.picture.clone(),
            provider: self.provider.clone(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
