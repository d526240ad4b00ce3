//! # provsync-core
//!
//! Configuration surface and source-record domain types shared by every
//! provsync crate. Holds no I/O: the MongoDB and Grist collaborators live in
//! their own crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{IdentityProvider, ServiceProvider};
