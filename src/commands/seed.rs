//! `transfers-admin seed`: load the demo dataset.

use anyhow::Result;
use std::path::Path;

use transfers_admin::models::seed;

/// Execute the seed command.
pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path, None)?;
    let (store, _) = super::open_services(&config)?;

    seed::seed(&store).await?;
    println!("Database seeded with demo data");
    Ok(())
}
