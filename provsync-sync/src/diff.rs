//! Diff engine.
//!
//! An any-difference detector, not a full delta report: the executor always
//! rewrites the entire desired record set in one bulk call, so a boolean
//! trigger is all a write decision needs. Scanning stops at the first
//! record found new or changed; within that record, every differing field
//! is collected so the log shows the complete per-record delta.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::normalize::DesiredRecord;
use crate::snapshot::RemoteFields;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// One differing field of a matched record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDelta {
    pub field: String,
    /// Current destination value; `None` when the field is absent remotely,
    /// which counts as a difference.
    pub remote: Option<Value>,
    pub desired: String,
}

/// Result of one diff pass.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffOutcome {
    /// Every desired record matches its remote row field-for-field.
    Unchanged,
    /// A desired record's unique key is absent from the remote set.
    NewRecord { uid: String, name: String },
    /// The first changed record, with every field that differs on it.
    FieldChanges { name: String, deltas: Vec<FieldDelta> },
}

impl DiffOutcome {
    pub fn has_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Compare desired records against the remote snapshot, per unique key.
///
/// A record is unchanged only if every one of its fields equals the remote
/// row's value under string comparison; a missing or non-string remote field
/// is a difference. `BTreeMap` iteration makes the scan order, and therefore
/// which record short-circuits, deterministic.
pub fn detect_change(
    desired: &BTreeMap<String, DesiredRecord>,
    remote: &BTreeMap<String, RemoteFields>,
) -> DiffOutcome {
    for record in desired.values() {
        let Some(remote_fields) = remote.get(record.uid()) else {
            return DiffOutcome::NewRecord {
                uid: record.uid().to_owned(),
                name: record.name().to_owned(),
            };
        };

        let deltas: Vec<FieldDelta> = record
            .fields()
            .iter()
            .filter(|(field, value)| {
                !matches!(remote_fields.get(*field), Some(Value::String(s)) if s == *value)
            })
            .map(|(field, value)| FieldDelta {
                field: field.clone(),
                remote: remote_fields.get(field).cloned(),
                desired: value.clone(),
            })
            .collect();

        if !deltas.is_empty() {
            return DiffOutcome::FieldChanges {
                name: record.name().to_owned(),
                deltas,
            };
        }
    }

    DiffOutcome::Unchanged
}

#[cfg(test)]
mod tests {
    use super::*;
    use provsync_core::IdentityProvider;
    use serde_json::json;

    use crate::normalize::identity_provider_record;

    fn provider(uid: &str, name: &str) -> IdentityProvider {
        IdentityProvider {
            uid: uid.into(),
            name: name.into(),
            title: String::new(),
            active: true,
            discovery_url: None,
            fqdns: vec![format!("{uid}.com")],
            siret: String::new(),
            id_token_signed_response_alg: None,
            userinfo_signed_response_alg: None,
        }
    }

    fn desired(providers: &[IdentityProvider]) -> BTreeMap<String, DesiredRecord> {
        providers
            .iter()
            .map(|p| (p.uid.clone(), identity_provider_record(p, "internet")))
            .collect()
    }

    /// Remote row exactly mirroring what the normalizer would produce.
    fn matching_remote(record: &DesiredRecord) -> RemoteFields {
        record
            .fields()
            .iter()
            .map(|(field, value)| (field.clone(), json!(value)))
            .collect()
    }

    fn matching_snapshot(
        desired: &BTreeMap<String, DesiredRecord>,
    ) -> BTreeMap<String, RemoteFields> {
        desired
            .iter()
            .map(|(uid, record)| (uid.clone(), matching_remote(record)))
            .collect()
    }

    #[test]
    fn identical_sets_are_unchanged() {
        let desired = desired(&[provider("idp1", "Acme"), provider("idp2", "Globex")]);
        let remote = matching_snapshot(&desired);
        assert_eq!(detect_change(&desired, &remote), DiffOutcome::Unchanged);
    }

    #[test]
    fn detection_is_idempotent_without_an_intervening_write() {
        let desired = desired(&[provider("idp1", "Acme")]);
        let remote = matching_snapshot(&desired);
        let first = detect_change(&desired, &remote);
        let second = detect_change(&desired, &remote);
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_unique_key_is_a_new_record() {
        let desired = desired(&[provider("idp1", "Acme"), provider("idp2", "Globex")]);
        let mut remote = matching_snapshot(&desired);
        remote.remove("idp2");

        let outcome = detect_change(&desired, &remote);
        assert_eq!(
            outcome,
            DiffOutcome::NewRecord {
                uid: "idp2".into(),
                name: "Globex".into()
            }
        );
        assert!(outcome.has_change());
    }

    #[test]
    fn single_field_change_is_detected() {
        let desired = desired(&[provider("idp1", "Acme"), provider("idp2", "Globex")]);
        let mut remote = matching_snapshot(&desired);
        remote
            .get_mut("idp2")
            .expect("idp2")
            .insert("Actif".into(), json!("Non"));

        match detect_change(&desired, &remote) {
            DiffOutcome::FieldChanges { name, deltas } => {
                assert_eq!(name, "Globex");
                assert_eq!(deltas.len(), 1);
                assert_eq!(deltas[0].field, "Actif");
                assert_eq!(deltas[0].remote, Some(json!("Non")));
                assert_eq!(deltas[0].desired, "Oui");
            }
            other => panic!("expected field changes, got {other:?}"),
        }
    }

    #[test]
    fn field_absent_on_the_remote_side_counts_as_a_difference() {
        let desired = desired(&[provider("idp1", "Acme")]);
        let mut remote = matching_snapshot(&desired);
        remote.get_mut("idp1").expect("idp1").remove("Liste_des_FQDN");

        match detect_change(&desired, &remote) {
            DiffOutcome::FieldChanges { deltas, .. } => {
                assert_eq!(deltas.len(), 1);
                assert_eq!(deltas[0].field, "Liste_des_FQDN");
                assert_eq!(deltas[0].remote, None);
            }
            other => panic!("expected field changes, got {other:?}"),
        }
    }

    #[test]
    fn non_string_remote_value_counts_as_a_difference() {
        let desired = desired(&[provider("idp1", "Acme")]);
        let mut remote = matching_snapshot(&desired);
        remote
            .get_mut("idp1")
            .expect("idp1")
            .insert("SIRET_par_defaut".into(), json!(null));

        assert!(detect_change(&desired, &remote).has_change());
    }

    #[test]
    fn scan_stops_at_the_first_changed_record() {
        // idp1 sorts first and is new; idp2's field change must not mask it.
        let desired = desired(&[provider("idp1", "Acme"), provider("idp2", "Globex")]);
        let mut remote = matching_snapshot(&desired);
        remote.remove("idp1");
        remote
            .get_mut("idp2")
            .expect("idp2")
            .insert("Actif".into(), json!("Non"));

        assert!(matches!(
            detect_change(&desired, &remote),
            DiffOutcome::NewRecord { uid, .. } if uid == "idp1"
        ));
    }
}
