//! # provsync-grist
//!
//! Destination collaborator for the Grist spreadsheet API.
//!
//! Exposes the [`Destination`] trait the sync pipeline is written against,
//! the wire types for the records endpoint, and [`GristClient`], a blocking
//! HTTP implementation with bearer authentication and optional forward-proxy
//! support.

pub mod client;
pub mod error;
pub mod types;

pub use client::GristClient;
pub use error::GristError;
pub use types::{RecordUpdate, RemoteRecord, Require};

/// A spreadsheet-style destination table store.
///
/// One GET returns the complete current row set for a table (no pagination);
/// one PUT bulk-upserts an ordered list of records, each located-or-created
/// through its `require` clause. Neither call is retried.
pub trait Destination {
    /// Fetch the full current record set of a table.
    fn fetch_records(&self, table_id: &str) -> Result<Vec<RemoteRecord>, GristError>;

    /// Bulk-upsert records into a table in the given order.
    fn put_records(&self, table_id: &str, updates: &[RecordUpdate]) -> Result<(), GristError>;
}
