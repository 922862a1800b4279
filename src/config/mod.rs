use serde::Deserialize;

use crate::error::ServerError;

#[derive(Debug, Deserialize, Clone)]
pub struct Configuration {
    pub server: ServerConfiguration,
    #[serde(default)]
    pub backend: BackendConfiguration,
    pub session: SessionConfiguration,
    pub oauth: OAuthConfiguration,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfiguration {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin the OAuth providers redirect back to.
    #[serde(default = "default_public_url")]
    pub public_url: String,

    /// How long a pending sign-in may wait for its callback.
    #[serde(default = "default_login_ttl")]
    pub login_ttl_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfiguration {
    #[serde(default = "default_backend_url")]
    pub url: String,
}

impl Default for BackendConfiguration {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfiguration {
    /// HMAC secret for the session cookie.
    pub secret: String,

    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OAuthConfiguration {
    pub google: ProviderCredentials,
    pub naver: ProviderCredentials,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,

    /// Scopes requested at authorization time. Providers with a usable
    /// default (google) set theirs in the registry; naver's stays here
    /// so operators can match their console settings.
    #[serde(default)]
    pub scopes: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_public_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_backend_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_login_ttl() -> u64 {
    600
}

fn default_session_ttl() -> i64 {
    // 30 days, matching the session cookie lifetime of the web client
    2_592_000
}

impl Configuration {
    pub fn new() -> Result<Self, ServerError> {
        let mut builder = config::Config::builder();

        if std::path::Path::new("config.toml").exists() {
            builder = builder.add_source(config::File::with_name("config"));
        }

        builder =
            builder.add_source(config::Environment::with_prefix("LINGO_PORTAL").separator("__"));

        let configuration: Configuration = builder.build()?.try_deserialize()?;
        configuration.validate()?;

        Ok(configuration)
    }

    /// Fail fast on malformed URLs and missing credentials instead of at the
    /// first sign-in.
    fn validate(&self) -> Result<(), ServerError> {
        for (key, value) in [
            ("server.public_url", &self.server.public_url),
            ("backend.url", &self.backend.url),
        ] {
            url::Url::parse(value)
                .map_err(|e| ServerError::Configuration(format!("Invalid {}: {}", key, e)))?;
        }

        for (provider, credentials) in [("google", &self.oauth.google), ("naver", &self.oauth.naver)]
        {
            if credentials.client_id.is_empty() || credentials.client_secret.is_empty() {
                return Err(ServerError::Configuration(format!(
                    "Missing OAuth credentials for provider '{}'",
                    provider
                )));
            }
        }

        if self.session.secret.is_empty() {
            return Err(ServerError::Configuration(
                "Session secret must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration() -> Configuration {
        Configuration {
            server: ServerConfiguration {
                host: default_host(),
                port: default_port(),
                public_url: default_public_url(),
                login_ttl_seconds: default_login_ttl(),
            },
            backend: BackendConfiguration::default(),
            session: SessionConfiguration {
                secret: "test-secret".to_string(),
                ttl_seconds: default_session_ttl(),
            },
            oauth: OAuthConfiguration {
                google: ProviderCredentials {
                    client_id: "google-id".to_string(),
                    client_secret: "google-secret".to_string(),
                    scopes: vec![],
                },
                naver: ProviderCredentials {
                    client_id: "naver-id".to_string(),
                    client_secret: "naver-secret".to_string(),
                    scopes: vec![],
                },
            },
        }
    }

    #[test]
    fn valid_configuration_passes() {
        assert!(configuration().validate().is_ok());
    }

    #[test]
    fn malformed_backend_url_is_rejected() {
        let mut configuration = configuration();
        configuration.backend.url = "not a url".to_string();
        assert!(matches!(
            configuration.validate(),
            Err(ServerError::Configuration(_))
        ));
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let mut configuration = configuration();
        configuration.oauth.naver.client_secret = String::new();
        let err = configuration.validate().unwrap_err();
        assert!(err.to_string().contains("naver"));
    }

    #[test]
    fn empty_session_secret_is_rejected() {
        let mut configuration = configuration();
        configuration.session.secret = String::new();
        assert!(matches!(
            configuration.validate(),
            Err(ServerError::Configuration(_))
        ));
    }
}
