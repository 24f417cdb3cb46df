//! # barsik-api Handlers
//!
//! This module coordinates the flow between HTTP requests, the upstream feed
//! and the askama templates.

use std::sync::RwLock;

use actix_web::{http::header, web, HttpResponse, Responder};
use askama::Template;
use barsik_core::{normalize_words, FilterKind, ModerationFeed, PanelState, PolicySettings};
use barsik_ui::{tab_links, BotInfo, DashboardTemplate, Tab, COMMANDS};
use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiError;
use crate::overview::load_overview;

const PAGE_TITLE: &str = "Барсик Модератор";

/// State shared across all Actix-web workers.
pub struct AppState {
    pub feed: Box<dyn ModerationFeed>,
    /// Form state of the filters/settings tabs
    pub panels: RwLock<PanelState>,
    pub bot: BotInfo,
    /// Forward saves to the moderation service
    pub write_back: bool,
}

impl AppState {
    pub fn new(
        feed: Box<dyn ModerationFeed>,
        panels: PanelState,
        bot: BotInfo,
        write_back: bool,
    ) -> Self {
        Self {
            feed,
            panels: RwLock::new(panels),
            bot,
            write_back,
        }
    }

    pub fn panels(&self) -> Result<PanelState, ApiError> {
        self.panels
            .read()
            .map(|p| p.clone())
            .map_err(|_| ApiError::Internal("panel state lock poisoned".into()))
    }

    fn update_panels(&self, apply: impl FnOnce(&mut PanelState)) -> Result<(), ApiError> {
        let mut panels = self
            .panels
            .write()
            .map_err(|_| ApiError::Internal("panel state lock poisoned".into()))?;
        apply(&mut panels);
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
}

/// Renders the whole dashboard with the requested tab open.
pub async fn dashboard(
    data: web::Data<AppState>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let tab = Tab::from_query(query.tab.as_deref());
    let overview = load_overview(data.feed.as_ref(), Utc::now()).await;
    let panels = data.panels()?;
    let tabs = tab_links(tab);

    let html = DashboardTemplate {
        title: PAGE_TITLE,
        active_tab: tab.key(),
        tabs: &tabs,
        stats: &overview.stats,
        logs: &overview.logs,
        analytics: &overview.analytics,
        panels: &panels,
        commands: &COMMANDS,
        bot: &data.bot,
        write_back: data.write_back,
    }
    .render()?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub words: String,
}

/// Replaces one word list, then (optionally) pushes it upstream.
pub async fn save_filters(
    data: web::Data<AppState>,
    path: web::Path<String>,
    form: web::Form<FilterForm>,
) -> Result<HttpResponse, ApiError> {
    let kind: FilterKind = path.into_inner().parse()?;
    let words = normalize_words(&form.words);

    data.update_panels(|panels| panels.filters.set(kind, words.clone()))?;
    log::info!("{kind} filter saved ({} words)", words.len());

    if data.write_back {
        match data.feed.save_filter_words(kind, &words).await {
            Ok(added) => log::info!("{kind} filter pushed upstream, {added} new words"),
            Err(e) => log::warn!("failed to push {kind} filter upstream: {e}"),
        }
    }

    Ok(redirect_to(Tab::Filters))
}

/// Checkboxes are only submitted when ticked.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    pub mute_for_profanity: Option<String>,
    #[serde(default)]
    pub mute_duration_minutes: String,
    pub kick_for_repeat: Option<String>,
    pub auto_remove_spam: Option<String>,
    pub warn_before_ban: Option<String>,
    pub log_actions: Option<String>,
    pub notify_admins: Option<String>,
    #[serde(default)]
    pub max_warnings: String,
}

impl SettingsForm {
    pub fn into_settings(self) -> Result<PolicySettings, ApiError> {
        Ok(PolicySettings {
            mute_for_profanity: self.mute_for_profanity.is_some(),
            mute_duration_minutes: positive("Длительность мута", &self.mute_duration_minutes)?,
            kick_for_repeat: self.kick_for_repeat.is_some(),
            auto_remove_spam: self.auto_remove_spam.is_some(),
            warn_before_ban: self.warn_before_ban.is_some(),
            log_actions: self.log_actions.is_some(),
            notify_admins: self.notify_admins.is_some(),
            max_warnings: positive("Макс. предупреждений", &self.max_warnings)?,
        })
    }
}

fn positive(field: &str, raw: &str) -> Result<u32, ApiError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            ApiError::Validation(format!("{field}: ожидается целое число больше нуля"))
        })
}

pub async fn save_settings(
    data: web::Data<AppState>,
    form: web::Form<SettingsForm>,
) -> Result<HttpResponse, ApiError> {
    let settings = form.into_inner().into_settings()?;
    let upstream = settings.to_upstream();

    data.update_panels(|panels| panels.settings = settings)?;
    log::info!("policy settings saved");

    if data.write_back {
        if let Err(e) = data.feed.save_settings(&upstream).await {
            log::warn!("failed to push settings upstream: {e}");
        }
    }

    Ok(redirect_to(Tab::Settings))
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("OK")
}

/// Post/redirect/get back to the tab the form lives on.
fn redirect_to(tab: Tab) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, format!("/?tab={}", tab.key())))
        .finish()
}
