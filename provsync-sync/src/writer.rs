//! Sync executor.
//!
//! Turns the desired record set into an ordered change set and issues the
//! single bulk upsert — but only when the diff engine found a difference.
//! The ordering has no effect on write correctness; it keeps logs and
//! destination-side revision diffs stable across runs.

use std::collections::BTreeMap;

use provsync_grist::{Destination, RecordUpdate, Require};

use crate::diff::DiffOutcome;
use crate::error::SyncError;
use crate::normalize::DesiredRecord;

// ---------------------------------------------------------------------------
// Pass outcome
// ---------------------------------------------------------------------------

/// Result of the write phase of one table pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Nothing differed; zero write calls were made.
    NoChange,
    /// The full desired set was written in one bulk call.
    Updated { records: usize },
}

// ---------------------------------------------------------------------------
// Change set
// ---------------------------------------------------------------------------

/// Build the ordered change set for the whole desired record set.
///
/// Each entry pairs the record's fields with the `require` clause (partition
/// tag + unique key) the destination uses to locate-or-create its row.
/// Sorted ascending by `{Reseau}/{Nom}`; Unicode code-point order stands in
/// for a locale-aware collation here, which is stable and close enough for
/// the ASCII-dominated names involved.
pub fn build_change_set(
    desired: &BTreeMap<String, DesiredRecord>,
    network: &str,
) -> Vec<RecordUpdate> {
    let mut updates: Vec<RecordUpdate> = desired
        .values()
        .map(|record| RecordUpdate {
            require: Require {
                reseau: network.to_owned(),
                uid: record.uid().to_owned(),
            },
            fields: record.clone().into_fields(),
        })
        .collect();
    updates.sort_by_key(sort_key);
    updates
}

fn sort_key(update: &RecordUpdate) -> String {
    let field = |name: &str| update.fields.get(name).map_or("", String::as_str).to_owned();
    format!("{}/{}", field("Reseau"), field("Nom"))
}

// ---------------------------------------------------------------------------
// Apply
// ---------------------------------------------------------------------------

/// Perform the write phase of one table pass.
///
/// A no-change outcome performs no destination call at all. Otherwise the
/// entire desired set goes out in exactly one bulk upsert; there is no
/// per-record or field-level push.
pub fn apply<D: Destination>(
    destination: &D,
    table_id: &str,
    outcome: &DiffOutcome,
    desired: &BTreeMap<String, DesiredRecord>,
    network: &str,
) -> Result<PassOutcome, SyncError> {
    if !outcome.has_change() {
        tracing::info!("No changes detected.");
        return Ok(PassOutcome::NoChange);
    }

    let updates = build_change_set(desired, network);
    tracing::info!("{} records to update in table '{table_id}'", updates.len());

    destination
        .put_records(table_id, &updates)
        .map_err(|source| SyncError::BulkUpdate {
            table: table_id.to_owned(),
            source,
        })?;

    tracing::info!("table '{table_id}' updated");
    Ok(PassOutcome::Updated {
        records: updates.len(),
    })
}
