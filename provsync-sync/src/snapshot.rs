//! Remote snapshot indexing.
//!
//! The destination table is shared between deployments; only rows carrying
//! this run's partition tag participate in the comparison. The snapshot is
//! fetched once per run per table and never cached across runs.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use provsync_grist::RemoteRecord;

/// Field mapping of one remote row.
pub type RemoteFields = Map<String, Value>;

/// Index fetched rows by unique key, keeping only the run's partition.
///
/// Rows without a string `UID` are dropped: they can never match a desired
/// record, and the unique key is the sole join key.
pub fn index_remote(
    records: Vec<RemoteRecord>,
    network: &str,
) -> BTreeMap<String, RemoteFields> {
    let mut index = BTreeMap::new();
    for record in records {
        if record.fields.get("Reseau").and_then(Value::as_str) != Some(network) {
            continue;
        }
        let Some(uid) = record.fields.get("UID").and_then(Value::as_str) else {
            continue;
        };
        index.insert(uid.to_owned(), record.fields);
    }
    index
}
