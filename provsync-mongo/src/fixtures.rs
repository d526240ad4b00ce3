//! Fixture documents for dev/test databases.
//!
//! Not business logic: these only exist so `provsync reset-db` can put a
//! fresh environment into a known state. Overrides use struct-update syntax
//! over the default document, keeping the large default literals out of the
//! callers.

use mongodb::bson::{doc, Document};
use mongodb::sync::Database;

use crate::error::SourceError;
use crate::{IDENTITY_COLLECTION, SERVICE_COLLECTION};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Named overrides for [`identity_provider_doc`].
#[derive(Debug, Clone, Default)]
pub struct IdentityProviderSeed {
    pub uid: String,
    pub name: String,
    pub siret: String,
    pub fqdns: Vec<String>,
}

/// Named overrides for [`service_provider_doc`].
#[derive(Debug, Clone, Default)]
pub struct ServiceProviderSeed {
    pub key: String,
    pub name: String,
    pub scopes: Vec<String>,
}

/// Full identity-provider document with defaults filled in.
pub fn identity_provider_doc(seed: IdentityProviderSeed) -> Document {
    doc! {
        "uid": seed.uid,
        "name": seed.name,
        "title": "Default Title",
        "active": true,
        "discoveryUrl": "https://default.discovery-url.fr",
        "discovery": true,
        "url": "https://default.issuer.fr",
        "authzURL": "https://default.authorization-url.fr",
        "tokenURL": "https://default.token-url.fr",
        "userInfoURL": "https://default.userinfo-url.fr",
        "endSessionURL": "https://default.logout-url.fr",
        "jwksURL": "https://default.jwks-url.fr",
        "statusURL": "https://default.status-url.fr",
        "clientID": "default_client_id",
        "client_secret": "default_client_secret",
        "id_token_signed_response_alg": "ES256",
        "userinfo_signed_response_alg": "ES256",
        "token_endpoint_auth_method": "default_auth_method",
        "supportEmail": "support@email.fr",
        "siret": seed.siret,
        "fqdns": seed.fqdns,
        "isRoutingEnabled": true,
    }
}

/// Full service-provider document with defaults filled in.
pub fn service_provider_doc(seed: ServiceProviderSeed) -> Document {
    doc! {
        "key": seed.key,
        "name": seed.name.clone(),
        "title": seed.name,
        "active": true,
        "type": "private",
        "redirect_uris": ["https://monfs.com"],
        "post_logout_redirect_uris": ["https://monfs.com/logout"],
        "scopes": seed.scopes,
        "id_token_signed_response_alg": "RS256",
        "userinfo_signed_response_alg": "RS256",
        "response_types": ["code"],
        "grant_types": ["authorization_code"],
        "jwks_uri": "https://monfs.com/jwks",
        "client_secret": "clientSecret",
        "email": "v@b.com",
        "IPServerAddressesAndRanges": ["192.0.0.0"],
        "updatedBy": "user",
    }
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// Drop both provider collections and reseed them with the sample set.
pub fn reset(database: &Database) -> Result<(), SourceError> {
    tracing::info!("dropping collections");
    drop_collection(database, IDENTITY_COLLECTION)?;
    drop_collection(database, SERVICE_COLLECTION)?;

    tracing::info!("recreating collections with sample data");
    let identity_providers: Vec<Document> = ["IdentityProviderA", "IdentityProviderB"]
        .iter()
        .map(|name| {
            identity_provider_doc(IdentityProviderSeed {
                uid: name.to_lowercase(),
                name: (*name).to_owned(),
                siret: "12345678900013".to_owned(),
                fqdns: vec![format!("{}.com", name.to_lowercase())],
            })
        })
        .collect();

    let service_providers: Vec<Document> = ["ServiceProviderA", "ServiceProviderB"]
        .iter()
        .map(|name| {
            service_provider_doc(ServiceProviderSeed {
                key: name.to_lowercase(),
                name: (*name).to_owned(),
                scopes: vec!["openid".to_owned(), "email".to_owned()],
            })
        })
        .collect();

    database
        .collection::<Document>(IDENTITY_COLLECTION)
        .insert_many(identity_providers, None)?;
    database
        .collection::<Document>(SERVICE_COLLECTION)
        .insert_many(service_providers, None)?;

    tracing::info!("collections recreated with sample data");
    Ok(())
}

/// Drop a collection, tolerating a fresh database where it does not exist.
fn drop_collection(database: &Database, name: &str) -> Result<(), SourceError> {
    match database.collection::<Document>(name).drop(None) {
        Ok(()) => Ok(()),
        Err(err) if is_ns_not_found(&err) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn is_ns_not_found(err: &mongodb::error::Error) -> bool {
    // Server code 26: NamespaceNotFound.
    matches!(
        err.kind.as_ref(),
        mongodb::error::ErrorKind::Command(command) if command.code == 26
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_seed_overrides_land_in_the_document() {
        let document = identity_provider_doc(IdentityProviderSeed {
            uid: "idp1".into(),
            name: "Acme".into(),
            siret: "12345678900013".into(),
            fqdns: vec!["acme.com".into()],
        });
        assert_eq!(document.get_str("uid").expect("uid"), "idp1");
        assert_eq!(document.get_str("name").expect("name"), "Acme");
        assert_eq!(document.get_str("title").expect("title"), "Default Title");
        assert_eq!(
            document.get_array("fqdns").expect("fqdns").len(),
            1
        );
    }

    #[test]
    fn service_seed_defaults_to_private_type() {
        let document = service_provider_doc(ServiceProviderSeed {
            key: "monfs".into(),
            name: "monfs".into(),
            scopes: vec![],
        });
        assert_eq!(document.get_str("type").expect("type"), "private");
        assert!(document.get_array("scopes").expect("scopes").is_empty());
    }

    #[test]
    fn seeded_identity_document_deserializes_as_a_source_record() {
        let document = identity_provider_doc(IdentityProviderSeed {
            uid: "identityprovidera".into(),
            name: "IdentityProviderA".into(),
            siret: "12345678900013".into(),
            fqdns: vec!["identityprovidera.com".into()],
        });
        let provider: provsync_core::IdentityProvider =
            mongodb::bson::from_document(document).expect("deserialize");
        assert_eq!(provider.uid, "identityprovidera");
        assert!(provider.active);
        assert_eq!(
            provider.id_token_signed_response_alg.as_deref(),
            Some("ES256")
        );
    }
}
