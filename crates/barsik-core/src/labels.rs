//! # Display Labels
//!
//! Turns raw counters and log records into the Russian labels shown on the
//! dashboard.

use chrono::{DateTime, Utc};

use crate::models::{ActionKind, LogEntry, RawLogRecord, StatEntry, StatsPayload};
use crate::timefmt::time_label;

/// Only the most recent records make it onto the page.
pub const LOG_PREVIEW_LIMIT: usize = 5;

/// Maps a machine action name to its display label. Unknown names pass through.
pub fn action_label(action: &str) -> &str {
    match action {
        "mute" => "Мут",
        "kick" => "Кик",
        "warn" => "Предупреждение",
        "remove" => "Удаление",
        other => other,
    }
}

impl ActionKind {
    pub fn from_action(action: &str) -> Self {
        match action {
            "mute" => ActionKind::Mute,
            "kick" => ActionKind::Kick,
            "warn" => ActionKind::Warn,
            "remove" => ActionKind::Remove,
            _ => ActionKind::Other,
        }
    }

    /// Tailwind classes for the row badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            ActionKind::Kick => "bg-destructive/20 text-destructive",
            ActionKind::Mute => "bg-orange-500/20 text-orange-500",
            ActionKind::Warn => "bg-yellow-500/20 text-yellow-500",
            ActionKind::Remove => "bg-primary/20 text-primary",
            ActionKind::Other => "bg-muted text-muted-foreground",
        }
    }
}

/// The four header tiles, in display order.
pub fn stat_tiles(stats: &StatsPayload) -> Vec<StatEntry> {
    vec![
        StatEntry {
            label: "Заблокировано сегодня",
            value: stats.today_bans.to_string(),
            icon: "user-x",
            color_class: "text-destructive",
        },
        StatEntry {
            label: "В муте сейчас",
            value: stats.current_mutes.to_string(),
            icon: "message-square-off",
            color_class: "text-orange-500",
        },
        StatEntry {
            label: "Предупреждений",
            value: stats.today_warns.to_string(),
            icon: "alert-triangle",
            color_class: "text-yellow-500",
        },
        StatEntry {
            label: "Очищено сообщений",
            value: stats.today_removes.to_string(),
            icon: "trash-2",
            color_class: "text-primary",
        },
    ]
}

impl LogEntry {
    pub fn from_raw(raw: &RawLogRecord, now: DateTime<Utc>) -> Self {
        LogEntry {
            action_label: action_label(&raw.action).to_string(),
            username: display_handle(raw.username.as_deref()),
            reason: raw.reason.clone().unwrap_or_default(),
            time_label: time_label(raw.created_at.as_deref(), now),
            kind: ActionKind::from_action(&raw.action),
        }
    }
}

/// Relabels the first [`LOG_PREVIEW_LIMIT`] records for display.
pub fn log_entries(records: &[RawLogRecord], now: DateTime<Utc>) -> Vec<LogEntry> {
    records
        .iter()
        .take(LOG_PREVIEW_LIMIT)
        .map(|raw| LogEntry::from_raw(raw, now))
        .collect()
}

fn display_handle(username: Option<&str>) -> String {
    match username.map(str::trim) {
        None | Some("") => "неизвестный".to_string(),
        Some(name) if name.starts_with('@') => name.to_string(),
        Some(name) => format!("@{name}"),
    }
}
