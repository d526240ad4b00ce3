//! Error types for provsync-sync.

use thiserror::Error;

use provsync_grist::GristError;

/// All errors that can arise from a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Reading source records failed. Fatal to the whole run: both table
    /// passes depend on the same source read.
    #[error("source read failed: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The destination snapshot could not be fetched. Fatal to that table's
    /// pass only; no write is attempted afterwards.
    #[error("snapshot fetch failed for table '{table}': {source}")]
    SnapshotFetch {
        table: String,
        #[source]
        source: GristError,
    },

    /// The bulk upsert failed. Fatal to that table's pass only; no partial
    /// recovery, no retry.
    #[error("bulk update failed for table '{table}': {source}")]
    BulkUpdate {
        table: String,
        #[source]
        source: GristError,
    },
}
