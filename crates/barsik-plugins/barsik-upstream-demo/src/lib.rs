//! # barsik-upstream-demo
//!
//! In-process `ModerationFeed` with canned data, for running the dashboard
//! without a moderation service. Settings and filter saves are kept in memory
//! so write-back can be exercised offline.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use barsik_core::error::{AppError, Result};
use barsik_core::models::{DailyStat, RawLogRecord, StatsPayload};
use barsik_core::panels::FilterKind;
use barsik_core::traits::ModerationFeed;
use chrono::{Duration, Utc};

/// Length of the generated daily series, matching what the service keeps.
const DEMO_DAYS: i64 = 30;

pub struct DemoModerationFeed {
    settings: RwLock<BTreeMap<String, String>>,
    filters: RwLock<HashMap<FilterKind, Vec<String>>>,
}

impl Default for DemoModerationFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoModerationFeed {
    pub fn new() -> Self {
        let settings = BTreeMap::from([("mute_duration_minutes".to_string(), "60".to_string())]);
        Self {
            settings: RwLock::new(settings),
            filters: RwLock::new(HashMap::new()),
        }
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::Internal("demo feed lock poisoned".into())
}

fn demo_record(action: &str, username: &str, reason: &str, minutes_ago: i64) -> RawLogRecord {
    RawLogRecord {
        action: action.to_string(),
        username: Some(username.to_string()),
        reason: Some(reason.to_string()),
        created_at: Some((Utc::now() - Duration::minutes(minutes_ago)).to_rfc3339()),
        user_id: None,
        chat_id: None,
    }
}

#[async_trait]
impl ModerationFeed for DemoModerationFeed {
    async fn fetch_stats(&self) -> Result<StatsPayload> {
        Ok(StatsPayload {
            today_bans: 12,
            current_mutes: 5,
            today_warns: 28,
            today_removes: 156,
        })
    }

    async fn fetch_logs(&self) -> Result<Vec<RawLogRecord>> {
        Ok(vec![
            demo_record("mute", "user123", "Мат в сообщении", 2),
            demo_record("kick", "spammer456", "Спам (3 нарушение)", 15),
            demo_record("warn", "newbie789", "Нецензурная лексика", 28),
            demo_record("remove", "advertiser321", "Реклама", 60),
            demo_record("mute", "toxic999", "Оскорбления", 120),
            demo_record("warn", "latecomer", "Флуд", 60 * 26),
        ])
    }

    /// Newest first, with a weekly rhythm so the bars are not flat.
    async fn fetch_daily_stats(&self) -> Result<Vec<DailyStat>> {
        let today = Utc::now().date_naive();
        Ok((0..DEMO_DAYS)
            .map(|offset| {
                let day = (today - Duration::days(offset)).format("%Y-%m-%d").to_string();
                let wave = (offset % 7) as u64;
                DailyStat {
                    date: day,
                    bans: wave % 3,
                    mutes: 2 + wave,
                    warns: 4 + (wave * 2) % 5,
                    removes: 6 + (offset as u64 * 3) % 11,
                }
            })
            .collect())
    }

    async fn fetch_settings(&self) -> Result<BTreeMap<String, String>> {
        Ok(self.settings.read().map_err(poisoned)?.clone())
    }

    async fn save_settings(&self, settings: &BTreeMap<String, String>) -> Result<()> {
        let mut stored = self.settings.write().map_err(poisoned)?;
        stored.extend(settings.iter().map(|(k, v)| (k.clone(), v.clone())));
        log::debug!("demo feed stored {} settings", settings.len());
        Ok(())
    }

    async fn fetch_filter_words(&self, kind: FilterKind) -> Result<Vec<String>> {
        Ok(self
            .filters
            .read()
            .map_err(poisoned)?
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    /// Like the real service: inserts only, counting words not already present.
    async fn save_filter_words(&self, kind: FilterKind, words: &[String]) -> Result<usize> {
        let mut filters = self.filters.write().map_err(poisoned)?;
        let list = filters.entry(kind).or_default();
        let mut added = 0;
        for word in words {
            if !list.contains(word) {
                list.push(word.clone());
                added += 1;
            }
        }
        Ok(added)
    }
}
