//! Pipeline orchestrator.
//!
//! One run pulls all source records, then drives one independent pass per
//! record kind: normalize → snapshot → diff → conditional bulk write. The
//! two passes share no mutable state and a failed pass never prevents the
//! other from being attempted; the run's overall result is the conjunction
//! of both.

use std::collections::BTreeMap;

use provsync_core::{IdentityProvider, ServiceProvider};
use provsync_grist::Destination;

use crate::diff::{self, DiffOutcome};
use crate::error::SyncError;
use crate::normalize::{self, DesiredRecord};
use crate::snapshot;
use crate::writer::{self, PassOutcome};

// ---------------------------------------------------------------------------
// Source collaborator
// ---------------------------------------------------------------------------

/// Read-only source of provider records, keyed by unique key.
///
/// The underlying store is assumed reachable and ready for reads; connection
/// bootstrap is the implementation's concern.
pub trait ProviderSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn identity_providers(&self) -> Result<BTreeMap<String, IdentityProvider>, Self::Error>;
    fn service_providers(&self) -> Result<BTreeMap<String, ServiceProvider>, Self::Error>;
}

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// Destination table identifiers, one per record kind.
#[derive(Debug, Clone)]
pub struct TableIds {
    pub identity: String,
    pub service: String,
}

/// Outcome of one table pass.
#[derive(Debug)]
pub struct PassReport {
    /// Which record kind this pass covered, for logs and summaries.
    pub label: &'static str,
    pub table_id: String,
    pub outcome: Result<PassOutcome, SyncError>,
}

/// Outcome of one full run.
#[derive(Debug)]
pub struct RunReport {
    pub passes: Vec<PassReport>,
}

impl RunReport {
    /// Conjunction of both passes' success flags.
    pub fn success(&self) -> bool {
        self.passes.iter().all(|pass| pass.outcome.is_ok())
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

/// Drive one full extraction-and-sync run over both provider kinds.
///
/// A source read failure is fatal to the whole run. Destination failures are
/// confined to their pass and reported per table in the [`RunReport`].
pub fn run<S: ProviderSource, D: Destination>(
    source: &S,
    destination: &D,
    network: &str,
    tables: &TableIds,
) -> Result<RunReport, SyncError> {
    let identity = source
        .identity_providers()
        .map_err(|e| SyncError::Source(Box::new(e)))?;
    tracing::info!("fetched {} identity providers", identity.len());

    let service = source
        .service_providers()
        .map_err(|e| SyncError::Source(Box::new(e)))?;
    tracing::info!("fetched {} service providers", service.len());

    let passes = vec![
        run_pass(
            destination,
            "identity providers",
            &tables.identity,
            network,
            &identity,
            normalize::identity_provider_record,
        ),
        run_pass(
            destination,
            "service providers",
            &tables.service,
            network,
            &service,
            normalize::service_provider_record,
        ),
    ];

    Ok(RunReport { passes })
}

/// One generic table pass, parameterized by the record kind's normalizer.
fn run_pass<T, D: Destination>(
    destination: &D,
    label: &'static str,
    table_id: &str,
    network: &str,
    providers: &BTreeMap<String, T>,
    to_record: fn(&T, &str) -> DesiredRecord,
) -> PassReport {
    let outcome = table_pass(destination, table_id, network, providers, to_record);
    if let Err(err) = &outcome {
        tracing::error!("{label} pass failed: {err}");
    }
    PassReport {
        label,
        table_id: table_id.to_owned(),
        outcome,
    }
}

fn table_pass<T, D: Destination>(
    destination: &D,
    table_id: &str,
    network: &str,
    providers: &BTreeMap<String, T>,
    to_record: fn(&T, &str) -> DesiredRecord,
) -> Result<PassOutcome, SyncError> {
    let desired: BTreeMap<String, DesiredRecord> = providers
        .iter()
        .map(|(key, provider)| (key.clone(), to_record(provider, network)))
        .collect();

    let remote = destination
        .fetch_records(table_id)
        .map_err(|source| SyncError::SnapshotFetch {
            table: table_id.to_owned(),
            source,
        })?;
    let remote = snapshot::index_remote(remote, network);

    let outcome = diff::detect_change(&desired, &remote);
    log_outcome(&outcome, &desired);

    writer::apply(destination, table_id, &outcome, &desired, network)
}

fn log_outcome(outcome: &DiffOutcome, desired: &BTreeMap<String, DesiredRecord>) {
    match outcome {
        DiffOutcome::Unchanged => {}
        DiffOutcome::NewRecord { uid, name } => {
            tracing::info!("nouveau fournisseur : {name}");
            if let Some(record) = desired.get(uid) {
                tracing::info!("{:?}", record.fields());
            }
        }
        DiffOutcome::FieldChanges { name, deltas } => {
            for delta in deltas {
                let remote = delta
                    .remote
                    .as_ref()
                    .map_or_else(|| "<absent>".to_owned(), ToString::to_string);
                tracing::info!(
                    "[{name}] changement {} : {remote} -> {}",
                    delta.field,
                    delta.desired
                );
            }
        }
    }
}
