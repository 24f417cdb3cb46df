//! # Overview Loading
//!
//! Pulls everything a page render needs from the feed. The three reads run
//! concurrently and fail independently: a failed read is logged and its part
//! of the page falls back to empty/zero values.

use barsik_core::{
    log_entries, stat_tiles, AnalyticsView, FilterKind, LogEntry, ModerationFeed, PanelState,
    StatEntry, StatsPayload,
};
use chrono::{DateTime, Utc};

/// Display-ready data for the header tiles, the logs tab and the analytics tab.
#[derive(Debug, Clone)]
pub struct Overview {
    pub stats: Vec<StatEntry>,
    pub logs: Vec<LogEntry>,
    pub analytics: AnalyticsView,
}

pub async fn load_overview(feed: &dyn ModerationFeed, now: DateTime<Utc>) -> Overview {
    let (stats, logs, daily) = futures_util::join!(
        feed.fetch_stats(),
        feed.fetch_logs(),
        feed.fetch_daily_stats()
    );

    let stats = stats.unwrap_or_else(|e| {
        log::error!("failed to fetch stats: {e}");
        StatsPayload::default()
    });
    let logs = logs.unwrap_or_else(|e| {
        log::error!("failed to fetch logs: {e}");
        Vec::new()
    });
    let daily = daily.unwrap_or_else(|e| {
        log::error!("failed to fetch daily stats: {e}");
        Vec::new()
    });

    Overview {
        stats: stat_tiles(&stats),
        logs: log_entries(&logs, now),
        analytics: AnalyticsView::from_series(&daily),
    }
}

/// Seeds panel state from the service's settings and filter tables.
/// Anything that cannot be read keeps its default.
pub async fn seed_panels(feed: &dyn ModerationFeed, panels: &mut PanelState) {
    match feed.fetch_settings().await {
        Ok(values) => panels.settings.apply_upstream(&values),
        Err(e) => log::warn!("could not load bot settings, using defaults: {e}"),
    }
    for kind in FilterKind::ALL {
        match feed.fetch_filter_words(kind).await {
            Ok(words) => panels.filters.set(kind, words),
            Err(e) => log::warn!("could not load {kind} filter, using defaults: {e}"),
        }
    }
}
