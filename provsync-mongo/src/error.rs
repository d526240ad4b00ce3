//! Error types for provsync-mongo.

use thiserror::Error;

/// All errors that can arise from source database access.
///
/// Any of these is fatal to the run that hits it: both table passes depend
/// on the same source read, and a record that fails to deserialize (for
/// instance one missing its unique key) cannot be matched downstream.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),
}
