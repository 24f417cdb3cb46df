//! # barsik-ui
//!
//! Askama templates for the dashboard page and the small view types they
//! need beyond what barsik-core provides.

use askama::Template;
use barsik_core::{AnalyticsView, LogEntry, PanelState, StatEntry};

/// The five tabs of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Analytics,
    #[default]
    Logs,
    Filters,
    Settings,
    Commands,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Analytics,
        Tab::Logs,
        Tab::Filters,
        Tab::Settings,
        Tab::Commands,
    ];

    /// Value of the `?tab=` query parameter.
    pub fn key(&self) -> &'static str {
        match self {
            Tab::Analytics => "analytics",
            Tab::Logs => "logs",
            Tab::Filters => "filters",
            Tab::Settings => "settings",
            Tab::Commands => "commands",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Analytics => "Аналитика",
            Tab::Logs => "Логи",
            Tab::Filters => "Фильтры",
            Tab::Settings => "Настройки",
            Tab::Commands => "Команды",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Tab::Analytics => "bar-chart-3",
            Tab::Logs => "scroll-text",
            Tab::Filters => "filter",
            Tab::Settings => "settings",
            Tab::Commands => "terminal",
        }
    }

    /// Unknown or missing values fall back to the logs tab.
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(|key| Tab::ALL.into_iter().find(|tab| tab.key() == key))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct TabLink {
    pub key: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

pub fn tab_links(active: Tab) -> Vec<TabLink> {
    Tab::ALL
        .iter()
        .map(|tab| TabLink {
            key: tab.key(),
            label: tab.label(),
            icon: tab.icon(),
            active: *tab == active,
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
pub struct CommandRef {
    pub command: &'static str,
    pub description: &'static str,
}

/// Chat commands the bot understands.
pub const COMMANDS: [CommandRef; 8] = [
    CommandRef { command: "/ban @user", description: "Забанить пользователя навсегда" },
    CommandRef { command: "/mute @user [минуты]", description: "Ограничить возможность писать на время" },
    CommandRef { command: "/unmute @user", description: "Снять мут с пользователя" },
    CommandRef { command: "/kick @user", description: "Кикнуть пользователя из чата" },
    CommandRef { command: "/warn @user", description: "Выдать предупреждение пользователю" },
    CommandRef { command: "/clear [число]", description: "Удалить последние N сообщений" },
    CommandRef { command: "/stats", description: "Показать статистику модерации" },
    CommandRef { command: "/filters", description: "Управление фильтрами слов" },
];

/// Bot info card on the commands tab.
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub handle: String,
    pub version: String,
    pub active_since: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub title: &'a str,
    pub active_tab: &'a str,
    pub tabs: &'a [TabLink],
    pub stats: &'a [StatEntry],
    pub logs: &'a [LogEntry],
    pub analytics: &'a AnalyticsView,
    pub panels: &'a PanelState,
    pub commands: &'a [CommandRef],
    pub bot: &'a BotInfo,
    /// Whether saves are forwarded to the moderation service
    pub write_back: bool,
}
