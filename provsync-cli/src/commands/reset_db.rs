//! `provsync reset-db` — reseed the provider collections with fixture data.

use anyhow::{Context, Result};

use provsync_core::Config;
use provsync_mongo::MongoSource;

pub fn run() -> Result<()> {
    let config = Config::from_env().context("invalid configuration")?;

    let source = MongoSource::connect(&config).context("could not connect to MongoDB")?;
    source
        .reset_fixtures()
        .context("could not reset provider collections")?;

    println!("✓ provider collections reset with sample data");
    Ok(())
}
