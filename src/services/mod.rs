pub mod backend;
pub mod login_store;
pub mod oauth_client;
pub mod providers;
pub mod session;

pub use backend::{BackendClient, HealthCheckError};
pub use login_store::{LoginStore, PendingLogin};
pub use oauth_client::OAuthClient;
pub use session::SessionSigner;
