//! Source-record domain types.
//!
//! These mirror the projected shape read from the source database, not the
//! full stored documents. The unique key (`uid` / `key`) is mandatory: a
//! document without it cannot be matched against the destination table, so
//! deserialization fails and the whole run fails with it. Every other
//! optional attribute degrades to an empty value during normalization
//! instead of failing the run.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

/// An identity-provider entry from the `provider` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityProvider {
    /// Stable unique key; sole join key against the destination table.
    pub uid: String,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub active: bool,
    #[serde(rename = "discoveryUrl", default)]
    pub discovery_url: Option<String>,
    #[serde(default)]
    pub fqdns: Vec<String>,
    #[serde(default)]
    pub siret: String,
    #[serde(default)]
    pub id_token_signed_response_alg: Option<String>,
    #[serde(default)]
    pub userinfo_signed_response_alg: Option<String>,
}

// ---------------------------------------------------------------------------
// Service provider
// ---------------------------------------------------------------------------

/// A service-provider entry from the `client` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceProvider {
    /// Stable unique key; sole join key against the destination table.
    pub key: String,
    pub name: String,
    pub active: bool,
    /// Provider visibility, `"private"` or `"public"`.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
    #[serde(default)]
    pub post_logout_redirect_uris: Vec<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub id_token_signed_response_alg: Option<String>,
    #[serde(default)]
    pub userinfo_signed_response_alg: Option<String>,
}
