//! # th-store-json
//!
//! JSON-file implementation of `ParkStore`.
//!
//! The site consumes `parks.json` at build time, so the canonical dataset
//! is a pretty-printed JSON array on disk and the store reads and writes
//! it whole.

use anyhow::Context;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use th_core::models::Park;
use th_core::traits::ParkStore;
use tokio::fs;

pub struct JsonParkStore {
    path: PathBuf,
}

impl JsonParkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ParkStore for JsonParkStore {
    async fn load(&self) -> anyhow::Result<Vec<Park>> {
        let bytes = fs::read(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;
        let parks = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(parks)
    }

    async fn save(&self, parks: &[Park]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let json = serde_json::to_vec_pretty(parks)?;
        fs::write(&self.path, json)
            .await
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use th_core::models::{Park, ReviewStatus, Source};

    fn sample() -> Park {
        Park {
            id: "zion".into(),
            name: "Zion National Park".into(),
            state: "UT".into(),
            lat: 37.3,
            lon: -113.0,
            accessible_restrooms: Some(true),
            accessible_parking: Some(true),
            accessible_trails: None,
            sources: vec![Source::Nps],
            affiliate_links: Default::default(),
            status: ReviewStatus::Verified,
            reviewer_notes: Some("Pa'rus Trail is paved".into()),
            accessibility_details: None,
            data_status: None,
            osm_tags: vec![],
            osm_ids: vec![],
        }
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let tmp = TempDir::new().unwrap();
        let store = JsonParkStore::new(tmp.path().join("data/parks.json"));

        store.save(&[sample()]).await.unwrap();
        let parks = store.load().await.unwrap();

        assert_eq!(parks.len(), 1);
        assert_eq!(parks[0].id, "zion");
        assert_eq!(parks[0].reviewer_notes.as_deref(), Some("Pa'rus Trail is paved"));
    }

    #[tokio::test]
    async fn load_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let store = JsonParkStore::new(tmp.path().join("nope.json"));
        assert!(store.load().await.is_err());
    }
}
