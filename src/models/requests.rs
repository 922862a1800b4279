use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CanonicalIdentity;

// GET /auth/signin/{provider}
#[derive(Debug, Deserialize)]
pub struct SigninParams {
    pub callback_url: Option<String>,
}

// GET /auth/callback/{provider}
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

// GET /auth/session
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<CanonicalIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl SessionResponse {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            expires: None,
        }
    }
}

// GET /api/health failure body; successful checks pass the upstream
// body through untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl HealthStatus {
    pub fn error(message: String, now: DateTime<Utc>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message),
            timestamp: now.to_rfc3339(),
        }
    }
}
