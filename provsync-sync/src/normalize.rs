//! Record normalizer.
//!
//! Maps a raw source record into the flat, all-string shape the destination
//! table stores. Pure functions: no I/O, no failure path. Booleans render as
//! `Oui`/`Non`, list fields join with `", "`, absent optional scalars
//! degrade to an empty string, and every produced record carries the run's
//! partition tag in `Reseau`.

use std::collections::BTreeMap;

use provsync_core::{IdentityProvider, ServiceProvider};

// ---------------------------------------------------------------------------
// Desired record
// ---------------------------------------------------------------------------

/// The destination-shaped projection of one source record.
///
/// Recomputed every run and discarded afterwards; the destination table is
/// the only persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredRecord {
    fields: BTreeMap<String, String>,
}

impl DesiredRecord {
    fn from_fields<const N: usize>(fields: [(&str, String); N]) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_owned(), value))
                .collect(),
        }
    }

    /// Unique key joining this record to its destination row.
    pub fn uid(&self) -> &str {
        self.get("UID")
    }

    /// Display name, second component of the change-set sort key.
    pub fn name(&self) -> &str {
        self.get("Nom")
    }

    /// Partition tag, first component of the change-set sort key.
    pub fn network(&self) -> &str {
        self.get("Reseau")
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map_or("", String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

// ---------------------------------------------------------------------------
// Normalizers
// ---------------------------------------------------------------------------

/// Destination encoding of a boolean.
fn oui_non(value: bool) -> String {
    let token = if value { "Oui" } else { "Non" };
    token.to_owned()
}

/// Flatten a list field; an empty list yields an empty string, never an
/// absent field.
fn join_list(items: &[String]) -> String {
    items.join(", ")
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// Shape one identity provider for the destination table.
pub fn identity_provider_record(provider: &IdentityProvider, network: &str) -> DesiredRecord {
    DesiredRecord::from_fields([
        ("UID", provider.uid.clone()),
        ("Nom", provider.name.clone()),
        ("Titre", provider.title.clone()),
        ("Actif", oui_non(provider.active)),
        ("Reseau", network.to_owned()),
        ("URL_de_decouverte", or_empty(&provider.discovery_url)),
        ("Liste_des_FQDN", join_list(&provider.fqdns)),
        ("SIRET_par_defaut", provider.siret.clone()),
        (
            "Alg_ID_token",
            or_empty(&provider.id_token_signed_response_alg),
        ),
        (
            "Alg_userinfo",
            or_empty(&provider.userinfo_signed_response_alg),
        ),
    ])
}

/// Shape one service provider for the destination table.
pub fn service_provider_record(provider: &ServiceProvider, network: &str) -> DesiredRecord {
    DesiredRecord::from_fields([
        ("UID", provider.key.clone()),
        ("Nom", provider.name.clone()),
        ("Actif", oui_non(provider.active)),
        ("Reseau", network.to_owned()),
        ("Accepte_le_prive", oui_non(provider.kind == "private")),
        (
            "Liste_des_URL_de_callback",
            join_list(&provider.redirect_uris),
        ),
        (
            "Liste_des_URL_de_logout",
            join_list(&provider.post_logout_redirect_uris),
        ),
        (
            "Alg_ID_token",
            or_empty(&provider.id_token_signed_response_alg),
        ),
        (
            "Alg_userinfo",
            or_empty(&provider.userinfo_signed_response_alg),
        ),
        ("Scopes", join_list(&provider.scopes)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_provider() -> IdentityProvider {
        IdentityProvider {
            uid: "idp1".into(),
            name: "Acme".into(),
            title: "Acme Identity".into(),
            active: true,
            discovery_url: Some("https://acme.com/.well-known/openid-configuration".into()),
            fqdns: vec!["acme.com".into(), "acme.fr".into()],
            siret: "12345678900013".into(),
            id_token_signed_response_alg: Some("ES256".into()),
            userinfo_signed_response_alg: None,
        }
    }

    #[test]
    fn active_flag_renders_as_oui_non() {
        let mut provider = identity_provider();
        assert_eq!(identity_provider_record(&provider, "internet").get("Actif"), "Oui");
        provider.active = false;
        assert_eq!(identity_provider_record(&provider, "internet").get("Actif"), "Non");
    }

    #[test]
    fn list_fields_join_with_comma_space() {
        let record = identity_provider_record(&identity_provider(), "internet");
        assert_eq!(record.get("Liste_des_FQDN"), "acme.com, acme.fr");
    }

    #[test]
    fn empty_list_yields_empty_string_not_absent_field() {
        let mut provider = identity_provider();
        provider.fqdns.clear();
        let record = identity_provider_record(&provider, "internet");
        assert!(record.fields().contains_key("Liste_des_FQDN"));
        assert_eq!(record.get("Liste_des_FQDN"), "");
    }

    #[test]
    fn absent_optional_scalars_degrade_to_empty_string() {
        let mut provider = identity_provider();
        provider.discovery_url = None;
        provider.userinfo_signed_response_alg = None;
        let record = identity_provider_record(&provider, "internet");
        assert_eq!(record.get("URL_de_decouverte"), "");
        assert_eq!(record.get("Alg_userinfo"), "");
    }

    #[test]
    fn every_record_carries_the_partition_tag() {
        let record = identity_provider_record(&identity_provider(), "rie");
        assert_eq!(record.network(), "rie");
    }

    #[test]
    fn service_provider_private_type_renders_accepte_le_prive() {
        let provider = ServiceProvider {
            key: "monfs".into(),
            name: "monfs".into(),
            active: true,
            kind: "private".into(),
            redirect_uris: vec!["https://monfs.com".into()],
            post_logout_redirect_uris: vec![],
            scopes: vec!["openid".into(), "email".into()],
            id_token_signed_response_alg: Some("RS256".into()),
            userinfo_signed_response_alg: Some("RS256".into()),
        };
        let record = service_provider_record(&provider, "internet");
        assert_eq!(record.get("Accepte_le_prive"), "Oui");
        assert_eq!(record.get("Scopes"), "openid, email");
        assert_eq!(record.uid(), "monfs");

        let public = ServiceProvider {
            kind: "public".into(),
            ..provider
        };
        assert_eq!(
            service_provider_record(&public, "internet").get("Accepte_le_prive"),
            "Non"
        );
    }
}
