//! # Domain Models
//!
//! Wire payloads returned by the moderation service, and the display
//! records the dashboard derives from them on every render.

use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Aggregate counters from `?action=stats`. Missing counters are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_bans: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_mutes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_warns: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_removes: u64,
}

/// Envelope of `?action=logs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogsPayload {
    pub logs: Vec<RawLogRecord>,
}

/// One moderation event as stored by the bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLogRecord {
    /// Machine action name (e.g., "mute", "remove")
    #[serde(default, deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    /// ISO-8601, with or without an offset
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub chat_id: Option<i64>,
}

/// Envelope of `?action=daily-stats`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyStatsPayload {
    pub daily_stats: Vec<DailyStat>,
}

/// Per-calendar-day counts of the four moderation action types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStat {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bans: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mutes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warns: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub removes: u64,
}

impl DailyStat {
    pub fn total(&self) -> u64 {
        [self.bans, self.mutes, self.warns, self.removes]
            .into_iter()
            .fold(0, u64::saturating_add)
    }
}

/// A counter tile in the header grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatEntry {
    pub label: &'static str,
    pub value: String,
    /// Lucide icon name
    pub icon: &'static str,
    pub color_class: &'static str,
}

/// Display tag of a log row; drives the badge colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Mute,
    Kick,
    Warn,
    Remove,
    Other,
}

/// A row of the moderation history list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub action_label: String,
    pub username: String,
    pub reason: String,
    pub time_label: String,
    pub kind: ActionKind,
}
