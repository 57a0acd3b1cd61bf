//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binaries.

use crate::models::Park;
use async_trait::async_trait;

/// Persistence contract for the park dataset.
#[async_trait]
pub trait ParkStore: Send + Sync {
    /// Loads the full dataset.
    async fn load(&self) -> anyhow::Result<Vec<Park>>;

    /// Replaces the full dataset.
    async fn save(&self, parks: &[Park]) -> anyhow::Result<()>;
}

/// Destination for submitted feedback payloads.
///
/// The site contract is deliberately loose: payloads are arbitrary JSON and
/// the only implementation writes them to the operational log. A durable
/// sink would slot in behind this trait without touching the endpoint.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn record(&self, payload: &serde_json::Value) -> anyhow::Result<()>;
}
