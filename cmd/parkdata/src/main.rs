//! # parkdata
//!
//! Pipeline CLI for the Trailhead park dataset: fetch from the NPS API and
//! OSM Overpass, merge, validate, backfill bookkeeping, and roll back OSM
//! enrichment. Every subcommand reads and writes the same `parks.json` the
//! site is built from.

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use th_core::models::{Park, ReviewStatus};
use th_core::traits::ParkStore;
use th_pipeline::{backfill_data_status, ensure_valid, merge_osm_entries, strip_osm_enrichment};
use th_source_nps::NpsClient;
use th_source_osm::{dedupe_trails, OsmFilters, OverpassClient, STATES};
use th_store_json::JsonParkStore;

#[derive(Parser, Debug)]
#[command(name = "parkdata", version, about = "Trailhead park dataset pipeline")]
struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "data/parks.json",
        help = "Park dataset file"
    )]
    data: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch National Park records from the NPS API (needs NPS_API_KEY)
    FetchNps {
        #[arg(long, default_value = "data/manual_overrides.json")]
        overrides: PathBuf,
    },
    /// Fetch wheelchair-accessibility features from OSM Overpass
    FetchOsm {
        #[arg(long, default_value = "data/osm_raw.json")]
        raw_out: PathBuf,
        #[arg(long, default_value = "data/osm_accessible.json")]
        out: PathBuf,
        #[arg(long, default_value = "data/osm_filters.json")]
        filters: PathBuf,
    },
    /// Merge fetched OSM entries into the park dataset by proximity
    Merge {
        #[arg(long, default_value = "data/osm_accessible.json")]
        osm: PathBuf,
    },
    /// Check the dataset for duplicate ids and bad coordinates
    Validate,
    /// Backfill data_status on records that predate the field
    Status,
    /// Remove OSM-only records and strip OSM traces from the rest
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    let store = JsonParkStore::new(&cli.data);

    match cli.command {
        Commands::FetchNps { overrides } => fetch_nps(&store, &overrides).await,
        Commands::FetchOsm { raw_out, out, filters } => fetch_osm(&raw_out, &out, &filters).await,
        Commands::Merge { osm } => merge(&store, &osm).await,
        Commands::Validate => validate(&store).await,
        Commands::Status => status(&store).await,
        Commands::Reset => reset(&store).await,
    }
}

/// Reads an optional JSON side file; absence is not an error.
async fn read_json_if_exists<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            let value = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}

async fn fetch_nps(store: &JsonParkStore, overrides_path: &Path) -> anyhow::Result<()> {
    let client = NpsClient::from_env()?;
    let mut parks = client.fetch_national_parks().await?;

    match read_json_if_exists::<Vec<serde_json::Value>>(overrides_path).await {
        Ok(Some(overrides)) => {
            parks = th_source_nps::apply_overrides(parks, &overrides)?;
        }
        Ok(None) => {}
        // A broken overrides file should not throw away a finished fetch.
        Err(e) => log::warn!("skipping overrides: {e:#}"),
    }

    store.save(&parks).await?;

    let needs_review = parks
        .iter()
        .filter(|p| p.status == ReviewStatus::NeedsReview)
        .count();
    log::info!(
        "saved {} parks to {} ({} verified, {} needs_review)",
        parks.len(),
        store.path().display(),
        parks.len() - needs_review,
        needs_review
    );
    if needs_review > 0 {
        log::warn!("some parks need manual review");
    }
    Ok(())
}

async fn fetch_osm(raw_out: &Path, out: &Path, filters_path: &Path) -> anyhow::Result<()> {
    let filters: OsmFilters = match read_json_if_exists(filters_path).await? {
        Some(filters) => filters,
        None => {
            log::warn!("{} not found, using defaults", filters_path.display());
            OsmFilters::default()
        }
    };

    let client = OverpassClient::default();
    let (raw_elements, normalized) = client
        .crawl(STATES, &filters, Duration::from_secs(2))
        .await;

    log::info!("before deduplication: {} entries", normalized.len());
    let normalized = dedupe_trails(normalized);
    log::info!("after deduplication: {} entries", normalized.len());

    write_json(raw_out, &raw_elements).await?;
    log::info!("saved {} raw elements to {}", raw_elements.len(), raw_out.display());

    JsonParkStore::new(out).save(&normalized).await?;
    log::info!("saved {} normalized entries to {}", normalized.len(), out.display());
    Ok(())
}

async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let json = serde_json::to_vec_pretty(value)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

async fn merge(store: &JsonParkStore, osm_path: &Path) -> anyhow::Result<()> {
    let mut parks = store.load().await?;
    let osm_entries: Vec<Park> = JsonParkStore::new(osm_path).load().await?;
    log::info!(
        "loaded {} parks and {} OSM entries",
        parks.len(),
        osm_entries.len()
    );

    let report = merge_osm_entries(&mut parks, osm_entries);
    store.save(&parks).await?;

    log::info!("merged {} OSM entries into existing parks", report.merged);
    log::info!("added {} new parks from OSM", report.added);
    log::info!("total parks: {}", report.total);
    Ok(())
}

async fn validate(store: &JsonParkStore) -> anyhow::Result<()> {
    log::info!("🔍 starting data validation...");
    let parks = store.load().await?;
    log::info!("loaded {} parks", parks.len());
    ensure_valid(&parks)?;
    log::info!("✅ validation PASSED");
    Ok(())
}

async fn status(store: &JsonParkStore) -> anyhow::Result<()> {
    let mut parks = store.load().await?;
    let updated = backfill_data_status(&mut parks);
    store.save(&parks).await?;
    log::info!("updated {} of {} parks", updated, parks.len());
    Ok(())
}

async fn reset(store: &JsonParkStore) -> anyhow::Result<()> {
    let parks = store.load().await?;
    let (kept, report) = strip_osm_enrichment(parks);
    store.save(&kept).await?;
    log::info!("removed {} OSM entries", report.removed);
    log::info!("remaining parks: {}", report.kept);
    Ok(())
}
