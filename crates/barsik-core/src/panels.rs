//! # Panel State
//!
//! Word filters and punishment policy edited on the filters/settings tabs.
//! The state lives in the dashboard process; pushing it to the moderation
//! service is optional (see `ModerationFeed::save_settings`).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Which word list a filter edit targets. The wire names match the bot's
/// `filter_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Spam,
    Profanity,
}

impl FilterKind {
    pub const ALL: [FilterKind; 2] = [FilterKind::Spam, FilterKind::Profanity];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Spam => "spam",
            FilterKind::Profanity => "profanity",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spam" => Ok(FilterKind::Spam),
            "profanity" => Ok(FilterKind::Profanity),
            other => Err(AppError::ValidationError(format!(
                "unknown filter kind '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLists {
    pub spam: Vec<String>,
    pub profanity: Vec<String>,
}

impl Default for FilterLists {
    fn default() -> Self {
        FilterLists {
            spam: ["реклама", "спам", "скидка", "бесплатно"]
                .iter()
                .map(|w| w.to_string())
                .collect(),
            profanity: Vec::new(),
        }
    }
}

impl FilterLists {
    pub fn words(&self, kind: FilterKind) -> &[String] {
        match kind {
            FilterKind::Spam => &self.spam,
            FilterKind::Profanity => &self.profanity,
        }
    }

    pub fn set(&mut self, kind: FilterKind, words: Vec<String>) {
        match kind {
            FilterKind::Spam => self.spam = words,
            FilterKind::Profanity => self.profanity = words,
        }
    }

    /// Textarea contents: one word per line.
    pub fn text(&self, kind: FilterKind) -> String {
        self.words(kind).join("\n")
    }

    pub fn spam_text(&self) -> String {
        self.text(FilterKind::Spam)
    }

    pub fn profanity_text(&self) -> String {
        self.text(FilterKind::Profanity)
    }
}

/// Splits textarea input into words: trimmed, blanks dropped, first
/// occurrence of each duplicate kept.
pub fn normalize_words(text: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if !words.iter().any(|w| w == line) {
            words.push(line.to_string());
        }
    }
    words
}

/// Punishment policy toggles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySettings {
    pub mute_for_profanity: bool,
    pub mute_duration_minutes: u32,
    pub kick_for_repeat: bool,
    pub auto_remove_spam: bool,
    pub warn_before_ban: bool,
    pub log_actions: bool,
    pub notify_admins: bool,
    pub max_warnings: u32,
}

impl Default for PolicySettings {
    fn default() -> Self {
        PolicySettings {
            mute_for_profanity: true,
            mute_duration_minutes: 60,
            kick_for_repeat: true,
            auto_remove_spam: true,
            warn_before_ban: true,
            log_actions: true,
            notify_admins: false,
            max_warnings: 3,
        }
    }
}

impl PolicySettings {
    /// Key/value form stored in the bot's settings table.
    pub fn to_upstream(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert("mute_for_profanity".into(), self.mute_for_profanity.to_string());
        map.insert(
            "mute_duration_minutes".into(),
            self.mute_duration_minutes.to_string(),
        );
        map.insert("kick_for_repeat".into(), self.kick_for_repeat.to_string());
        map.insert("auto_remove_spam".into(), self.auto_remove_spam.to_string());
        map.insert("warn_before_ban".into(), self.warn_before_ban.to_string());
        map.insert("log_actions".into(), self.log_actions.to_string());
        map.insert("notify_admins".into(), self.notify_admins.to_string());
        map.insert("max_warnings".into(), self.max_warnings.to_string());
        map
    }

    /// Overlays values read from the settings table. Unknown keys and
    /// unparsable values are ignored, leaving the current value in place.
    pub fn apply_upstream(&mut self, values: &BTreeMap<String, String>) {
        for (key, raw) in values {
            let raw = raw.trim();
            match key.as_str() {
                "mute_for_profanity" => set_flag(&mut self.mute_for_profanity, raw),
                "kick_for_repeat" => set_flag(&mut self.kick_for_repeat, raw),
                "auto_remove_spam" => set_flag(&mut self.auto_remove_spam, raw),
                "warn_before_ban" => set_flag(&mut self.warn_before_ban, raw),
                "log_actions" => set_flag(&mut self.log_actions, raw),
                "notify_admins" => set_flag(&mut self.notify_admins, raw),
                "mute_duration_minutes" => set_number(&mut self.mute_duration_minutes, raw),
                "max_warnings" => set_number(&mut self.max_warnings, raw),
                _ => {}
            }
        }
    }
}

fn set_flag(slot: &mut bool, raw: &str) {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "on" => *slot = true,
        "false" | "0" | "off" => *slot = false,
        _ => {}
    }
}

fn set_number(slot: &mut u32, raw: &str) {
    if let Ok(value) = raw.parse() {
        *slot = value;
    }
}

/// All form-bound state of the filters and settings tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    pub filters: FilterLists,
    pub settings: PolicySettings,
}
