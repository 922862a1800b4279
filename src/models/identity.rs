use serde::{Deserialize, Serialize};

/// The normalized user record used uniformly across the portal, whichever
/// provider the user signed in with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalIdentity {
    /// Provider-scoped unique id. Non-empty whenever normalization succeeds.
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Key of the registry adapter that produced this record.
    pub provider: String,
}

/// What a provider's profile mapper extracts from the raw userinfo payload.
/// The provider key is attached by the registry, not the mapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileFields {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl ProfileFields {
    pub fn into_identity(self, provider: &str) -> CanonicalIdentity {
        CanonicalIdentity {
            id: self.id,
            name: self.name,
            email: self.email,
            image: self.image,
            provider: provider.to_string(),
        }
    }
}
