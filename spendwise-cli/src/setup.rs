use anyhow::{Context, Result};
use spendwise_ingest::DatasetStore;
use std::path::Path;

use crate::config::{Config, save_config};

/// Write the config file (unless present) and seed the bundled sample ledger.
pub fn run_init(config_path: &Path, cfg: &Config, store: &DatasetStore) -> Result<()> {
    if config_path.exists() {
        println!("Config already exists: {}", config_path.display());
    } else {
        save_config(cfg, config_path)?;
        println!("Wrote {}", config_path.display());
    }

    let seeded = store
        .seed_sample()
        .with_context(|| format!("seeding sample into {}", store.data_dir().display()))?;
    if seeded {
        println!("Wrote {}", store.sample_path().display());
    } else {
        println!("Sample already exists: {}", store.sample_path().display());
    }

    println!("\nNext:");
    println!("- spendwise recommend            (advice over the sample ledger)");
    println!("- spendwise upload <ledger.csv>  (use your own ledger instead)");

    Ok(())
}
