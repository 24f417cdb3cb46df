//! # Barsik Dashboard Binary
//!
//! The entry point that assembles the dashboard from configuration and
//! compile-time features.

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use barsik_api::middleware::{security_headers, standard_middleware};
use barsik_api::{configure_routes, seed_panels, AppState};
use barsik_config::{BotConfig, UpstreamConfig};
use barsik_core::{ModerationFeed, PanelState};
use barsik_ui::BotInfo;

// Feature-gated imports: the binary only links the feeds it was built with
#[cfg(feature = "upstream-http")]
use barsik_upstream_http::HttpModerationFeed;

#[cfg(feature = "upstream-demo")]
use barsik_upstream_demo::DemoModerationFeed;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = barsik_config::load_dotenv();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    if let Some(path) = dotenv {
        log::debug!("loaded environment from {}", path.display());
    }
    let cfg = barsik_config::load().context("failed to load dashboard configuration")?;

    // 1. Pick the upstream feed
    let feed = select_feed(&cfg.upstream)?;

    // 2. Form state starts from defaults, or from the bot when write-back is on
    let mut panels = PanelState::default();
    if cfg.panels.write_back {
        log::info!("write-back enabled: loading filters and settings from the moderation service");
        seed_panels(feed.as_ref(), &mut panels).await;
    }

    let state = web::Data::new(AppState::new(
        feed,
        panels,
        bot_info(&cfg.bot),
        cfg.panels.write_back,
    ));

    let static_dir = cfg.server.static_dir.clone();
    let bind = (cfg.server.host.clone(), cfg.server.port);
    log::info!("🐱 Barsik dashboard starting on http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(security_headers())
            .wrap(standard_middleware())
            .service(Files::new("/static", &static_dir))
            .configure(configure_routes)
    })
    .bind(bind)
    .context("failed to bind dashboard listener")?
    .run()
    .await?;

    Ok(())
}

fn bot_info(bot: &BotConfig) -> BotInfo {
    BotInfo {
        handle: bot.handle.clone(),
        version: bot.version.clone(),
        active_since: bot.active_since.clone(),
    }
}

/// A configured base URL selects the HTTP feed; otherwise the demo feed.
fn select_feed(upstream: &UpstreamConfig) -> anyhow::Result<Box<dyn ModerationFeed>> {
    if upstream.base_url.trim().is_empty() {
        demo_feed()
    } else {
        http_feed(upstream)
    }
}

#[cfg(feature = "upstream-http")]
fn http_feed(upstream: &UpstreamConfig) -> anyhow::Result<Box<dyn ModerationFeed>> {
    let feed = HttpModerationFeed::new(&upstream.base_url, upstream.timeout())?;
    log::info!("reading moderation data from {}", feed.base_url());
    Ok(Box::new(feed))
}

#[cfg(not(feature = "upstream-http"))]
fn http_feed(_upstream: &UpstreamConfig) -> anyhow::Result<Box<dyn ModerationFeed>> {
    anyhow::bail!("upstream.base_url is set but this build lacks the upstream-http feature")
}

#[cfg(feature = "upstream-demo")]
fn demo_feed() -> anyhow::Result<Box<dyn ModerationFeed>> {
    log::warn!("upstream.base_url is empty: serving demo data");
    Ok(Box::new(DemoModerationFeed::new()))
}

#[cfg(not(feature = "upstream-demo"))]
fn demo_feed() -> anyhow::Result<Box<dyn ModerationFeed>> {
    anyhow::bail!("upstream.base_url is empty and this build lacks the upstream-demo feature")
}
