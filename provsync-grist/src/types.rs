//! Wire types for the Grist records endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Read side
// ---------------------------------------------------------------------------

/// Response body of `GET /api/docs/{doc}/tables/{table}/records`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    pub records: Vec<RemoteRecord>,
}

/// One row currently stored in the destination table.
///
/// `id` is an opaque destination-side identifier; matching against desired
/// records goes exclusively through the `Reseau` and `UID` fields.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    pub id: i64,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Write side
// ---------------------------------------------------------------------------

/// One entry of the bulk-upsert PUT body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordUpdate {
    pub fields: BTreeMap<String, String>,
    pub require: Require,
}

/// Match clause the destination uses to locate-or-create the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Require {
    #[serde(rename = "Reseau")]
    pub reseau: String,
    #[serde(rename = "UID")]
    pub uid: String,
}
