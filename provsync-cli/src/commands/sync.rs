//! `provsync sync` — one extraction-and-sync pass over both provider kinds.

use anyhow::{Context, Result};

use provsync_core::Config;
use provsync_grist::GristClient;
use provsync_mongo::MongoSource;
use provsync_sync::{pipeline, PassOutcome, RunReport, TableIds};

pub fn run() -> Result<()> {
    let config = Config::from_env().context("invalid configuration")?;

    let source = MongoSource::connect(&config).context("could not connect to MongoDB")?;
    let destination = GristClient::new(
        &config.grist_domain,
        &config.grist_doc_id,
        &config.grist_api_key,
        config.proxy(),
    )
    .context("could not build Grist client")?;

    let tables = TableIds {
        identity: config.idp_table.clone(),
        service: config.sp_table.clone(),
    };

    let report = pipeline::run(&source, &destination, &config.network_name, &tables)
        .context("sync run failed")?;
    print_report(&report);

    // Destination-side pass failures are already logged per table; only
    // configuration and source-read errors change the exit code.
    Ok(())
}

fn print_report(report: &RunReport) {
    for pass in &report.passes {
        match &pass.outcome {
            Ok(PassOutcome::NoChange) => {
                println!("✓ {} ('{}') — no changes", pass.label, pass.table_id);
            }
            Ok(PassOutcome::Updated { records }) => {
                println!(
                    "✓ {} ('{}') — {records} records written",
                    pass.label, pass.table_id
                );
            }
            Err(err) => {
                println!("✗ {} ('{}') — {err}", pass.label, pass.table_id);
            }
        }
    }
}
