//! # provsync-sync
//!
//! The synchronization engine: normalize source records into their
//! destination shape, compare them against the destination's current
//! snapshot, and issue a single ordered bulk upsert only when something
//! actually changed.
//!
//! Call [`pipeline::run`] to drive one full pass over both provider kinds.

pub mod diff;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod snapshot;
pub mod writer;

pub use diff::{detect_change, DiffOutcome, FieldDelta};
pub use error::SyncError;
pub use normalize::DesiredRecord;
pub use pipeline::{run, PassReport, ProviderSource, RunReport, TableIds};
pub use writer::PassOutcome;
