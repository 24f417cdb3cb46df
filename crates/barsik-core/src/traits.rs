//! # Core Traits (Ports)
//!
//! Any upstream plugin must implement these traits to be used by the binary.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DailyStat, RawLogRecord, StatsPayload};
use crate::panels::FilterKind;

/// Read/write contract with the moderation service.
///
/// The three `fetch_*` reads feed every page render. The settings and filter
/// operations are only called when write-back is enabled.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ModerationFeed: Send + Sync {
    /// Today's aggregate counters (`?action=stats`).
    async fn fetch_stats(&self) -> Result<StatsPayload>;
    /// Recent events, newest first (`?action=logs`).
    async fn fetch_logs(&self) -> Result<Vec<RawLogRecord>>;
    /// Per-day counts, newest first (`?action=daily-stats`).
    async fn fetch_daily_stats(&self) -> Result<Vec<DailyStat>>;

    async fn fetch_settings(&self) -> Result<BTreeMap<String, String>>;
    async fn save_settings(&self, settings: &BTreeMap<String, String>) -> Result<()>;

    async fn fetch_filter_words(&self, kind: FilterKind) -> Result<Vec<String>>;
    /// Returns how many words the service accepted.
    async fn save_filter_words(&self, kind: FilterKind, words: &[String]) -> Result<usize>;
}
