//! # provsync-mongo
//!
//! Source collaborator: blocking MongoDB access to the `provider` (identity)
//! and `client` (service) collections, plus the fixture reseed used by
//! dev/test environments. Connection readiness is a precondition of the sync
//! run; there is no bootstrap retry here.

pub mod error;
pub mod fixtures;

use std::collections::BTreeMap;

use mongodb::bson::doc;
use mongodb::options::FindOptions;
use mongodb::sync::{Client, Database};

use provsync_core::{Config, IdentityProvider, ServiceProvider};
use provsync_sync::pipeline::ProviderSource;

pub use error::SourceError;

/// Name of the identity-provider collection.
pub const IDENTITY_COLLECTION: &str = "provider";
/// Name of the service-provider collection.
pub const SERVICE_COLLECTION: &str = "client";

// ---------------------------------------------------------------------------
// MongoSource
// ---------------------------------------------------------------------------

/// Blocking handle on the source database.
pub struct MongoSource {
    database: Database,
}

impl MongoSource {
    /// Connect using the configured credentials.
    pub fn connect(config: &Config) -> Result<Self, SourceError> {
        tracing::info!("connecting to MongoDB at {}", config.mongodb_hostname);
        let client = Client::with_uri_str(config.mongo_uri())?;
        Ok(Self {
            database: client.database(&config.mongodb_name),
        })
    }

    /// Drop both provider collections and reseed them with fixture data.
    pub fn reset_fixtures(&self) -> Result<(), SourceError> {
        fixtures::reset(&self.database)
    }
}

impl ProviderSource for MongoSource {
    type Error = SourceError;

    fn identity_providers(&self) -> Result<BTreeMap<String, IdentityProvider>, SourceError> {
        let collection = self
            .database
            .collection::<IdentityProvider>(IDENTITY_COLLECTION);
        let options = FindOptions::builder()
            .projection(doc! {
                "name": 1,
                "title": 1,
                "uid": 1,
                "discoveryUrl": 1,
                "active": 1,
                "siret": 1,
                "fqdns": 1,
                "id_token_signed_response_alg": 1,
                "userinfo_signed_response_alg": 1,
            })
            .build();

        let mut providers = BTreeMap::new();
        for provider in collection.find(None, options)? {
            let provider = provider?;
            providers.insert(provider.uid.clone(), provider);
        }
        Ok(providers)
    }

    fn service_providers(&self) -> Result<BTreeMap<String, ServiceProvider>, SourceError> {
        let collection = self
            .database
            .collection::<ServiceProvider>(SERVICE_COLLECTION);
        let options = FindOptions::builder()
            .projection(doc! {
                "name": 1,
                "key": 1,
                "active": 1,
                "redirect_uris": 1,
                "post_logout_redirect_uris": 1,
                "type": 1,
                "scopes": 1,
                "id_token_signed_response_alg": 1,
                "userinfo_signed_response_alg": 1,
            })
            .build();

        let mut providers = BTreeMap::new();
        for provider in collection.find(None, options)? {
            let provider = provider?;
            providers.insert(provider.key.clone(), provider);
        }
        Ok(providers)
    }
}
