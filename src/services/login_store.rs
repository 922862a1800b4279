use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;

/// A sign-in that has been redirected out to a provider and is waiting for
/// its callback.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub provider: String,
    pub callback_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Pending sign-ins keyed by their CSRF state token. Entries are consumed
/// exactly once by the callback; stragglers are reaped by a background task.
pub struct LoginStore {
    logins: Arc<DashMap<String, PendingLogin>>,
    ttl: Duration,
}

impl LoginStore {
    pub fn new(ttl_seconds: u64) -> Self {
        let store = Self {
            logins: Arc::new(DashMap::new()),
            ttl: Duration::from_secs(ttl_seconds),
        };

        // Spawn background cleanup task
        let logins_clone = store.logins.clone();
        let ttl_clone = store.ttl;
        tokio::spawn(async move {
            cleanup_expired_logins(logins_clone, ttl_clone).await;
        });

        tracing::info!("Login store initialized with TTL of {} seconds", ttl_seconds);
        store
    }

    /// Record a pending sign-in under its state token.
    pub fn insert(&self, state: String, provider: String, callback_url: Option<String>) {
        let login = PendingLogin {
            provider: provider.clone(),
            callback_url,
            created_at: Utc::now(),
        };
        self.logins.insert(state.clone(), login);
        tracing::debug!(
            state = %state,
            provider = %provider,
            "Created pending login"
        );
    }

    /// Consume a pending sign-in. One-time: the entry is gone afterwards,
    /// so a replayed state parameter finds nothing.
    pub fn take(&self, state: &str) -> Option<PendingLogin> {
        let login = self.logins.remove(state).map(|(_, login)| login);
        if login.is_some() {
            tracing::debug!(state = %state, "Consumed pending login");
        }
        login
    }
}

/// Background task that periodically cleans up abandoned sign-ins
async fn cleanup_expired_logins(logins: Arc<DashMap<String, PendingLogin>>, ttl: Duration) {
    let mut interval = tokio::time::interval(Duration::from_secs(60));
    loop {
        interval.tick().await;
        let now = Utc::now();
        let initial_count = logins.len();

        logins.retain(|state, login| {
            let age = now
                .signed_duration_since(login.created_at)
                .to_std()
                .unwrap_or(Duration::ZERO);

            if age >= ttl {
                tracing::debug!(
                    state = %state,
                    provider = %login.provider,
                    "Cleaning up abandoned sign-in"
                );
                false
            } else {
                true
            }
        });

        let cleaned = initial_count.saturating_sub(logins.len());
        if cleaned > 0 {
            tracing::info!(
                "Cleaned up {} abandoned sign-ins, {} remaining",
                cleaned,
                logins.len()
            );
        }
    }
}
