use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use log::{info, warn};
use serde::Serialize;
use snare_engine::catalog::LocationCatalog;
use snare_engine::config::EngineConfig;
use snare_engine::data::write_catalog_to_file;

#[derive(Debug, Serialize)]
struct CatalogMetadata {
    source_file: String,
    system: String,
    locations: usize,
    location_types: Vec<String>,
    generated_at_epoch: u64,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input = PathBuf::from(args.next().unwrap_or_else(|| "locations.json".into()));
    let output_dir = PathBuf::from(args.next().unwrap_or_else(|| "data".into()));
    if args.next().is_some() {
        bail!("usage: build_catalog [locations.json] [output-dir]");
    }

    let config = EngineConfig::from_env();
    info!(
        "Reading locations from {} for system {}",
        input.display(),
        config.filter.system
    );
    let catalog = LocationCatalog::from_json_file(&input, &config.filter)
        .with_context(|| format!("failed to load catalog from {}", input.display()))?;
    if catalog.is_empty() {
        warn!("no locations survived filtering; the bundle will be empty");
    }

    let names = catalog.display_names();
    let duplicates = names.len() - names.iter().collect::<HashSet<_>>().len();
    if duplicates > 0 {
        warn!(
            "{duplicates} locations share a display name with an earlier entry \
             and cannot be looked up"
        );
    }

    fs::create_dir_all(&output_dir).context("failed to create catalog output directory")?;
    let bundle_path = output_dir.join("catalog.bin");
    write_catalog_to_file(&catalog, &bundle_path)
        .with_context(|| format!("failed to write catalog to {}", bundle_path.display()))?;

    let metadata = CatalogMetadata {
        source_file: input.display().to_string(),
        system: config.filter.system.clone(),
        locations: catalog.len(),
        location_types: catalog.location_types(),
        generated_at_epoch: current_epoch_seconds(),
    };

    let metadata_path = output_dir.join("catalog.meta.json");
    let metadata_json = serde_json::to_vec_pretty(&metadata)?;
    fs::write(&metadata_path, metadata_json)
        .with_context(|| format!("failed to write metadata to {}", metadata_path.display()))?;

    info!(
        "Wrote catalog bundle to {} ({} locations, {} types)",
        bundle_path.display(),
        metadata.locations,
        metadata.location_types.len()
    );

    Ok(())
}

fn current_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
