//! # th-sink-log
//!
//! Log-only implementation of `FeedbackSink`.
//!
//! This is the whole persistence story for feedback today: payloads go to
//! the operational log and nowhere else. A database-backed sink would be a
//! sibling plugin behind the same port.

use async_trait::async_trait;
use th_core::traits::FeedbackSink;

pub struct LogFeedbackSink;

#[async_trait]
impl FeedbackSink for LogFeedbackSink {
    async fn record(&self, payload: &serde_json::Value) -> anyhow::Result<()> {
        log::info!("feedback received: {payload}");
        Ok(())
    }
}
