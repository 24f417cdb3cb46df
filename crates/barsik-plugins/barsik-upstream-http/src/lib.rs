//! # barsik-upstream-http
//!
//! `reqwest` implementation of `ModerationFeed`.
//! The moderation service exposes a single URL; the operation is picked by
//! the `action` query parameter and failures come back as `{"error": "..."}`.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use barsik_core::error::{AppError, Result};
use barsik_core::models::{DailyStat, DailyStatsPayload, LogsPayload, RawLogRecord, StatsPayload};
use barsik_core::panels::FilterKind;
use barsik_core::traits::ModerationFeed;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

pub struct HttpModerationFeed {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct WordsPayload {
    #[serde(default)]
    words: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct FilterAck {
    added: Option<usize>,
}

fn transport(err: reqwest::Error) -> AppError {
    AppError::Transport(err.to_string())
}

impl HttpModerationFeed {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("barsik-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends the request and returns the decoded body, mapping transport
    /// failures, non-2xx statuses and `{"error": ...}` bodies to errors.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            if let Some(message) = error_message(&body) {
                log::debug!("moderation service error body: {message}");
            }
            return Err(AppError::Status(status.as_u16()));
        }

        let value: Value = serde_json::from_str(&body)?;
        if let Some(message) = value.get("error").and_then(Value::as_str) {
            return Err(AppError::Upstream(message.to_string()));
        }
        Ok(value)
    }

    async fn get<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T> {
        let value = self
            .send(self.client.get(&self.base_url).query(query))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()?
        .get("error")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl ModerationFeed for HttpModerationFeed {
    async fn fetch_stats(&self) -> Result<StatsPayload> {
        self.get(&[("action", "stats")]).await
    }

    async fn fetch_logs(&self) -> Result<Vec<RawLogRecord>> {
        let payload: LogsPayload = self.get(&[("action", "logs")]).await?;
        Ok(payload.logs)
    }

    async fn fetch_daily_stats(&self) -> Result<Vec<DailyStat>> {
        let payload: DailyStatsPayload = self.get(&[("action", "daily-stats")]).await?;
        Ok(payload.daily_stats)
    }

    /// The settings table stores strings, but tolerate bare JSON scalars.
    async fn fetch_settings(&self) -> Result<BTreeMap<String, String>> {
        let value: Value = self.get(&[("action", "settings")]).await?;
        let Value::Object(map) = value else {
            return Err(AppError::Decode("settings payload is not an object".into()));
        };
        Ok(map
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect())
    }

    async fn save_settings(&self, settings: &BTreeMap<String, String>) -> Result<()> {
        self.send(
            self.client
                .put(&self.base_url)
                .query(&[("action", "settings")])
                .json(settings),
        )
        .await?;
        Ok(())
    }

    async fn fetch_filter_words(&self, kind: FilterKind) -> Result<Vec<String>> {
        let payload: WordsPayload = self
            .get(&[("action", "filters"), ("type", kind.as_str())])
            .await?;
        Ok(payload.words)
    }

    async fn save_filter_words(&self, kind: FilterKind, words: &[String]) -> Result<usize> {
        let value = self
            .send(
                self.client
                    .post(&self.base_url)
                    .query(&[("action", "filters")])
                    .json(&json!({ "type": kind.as_str(), "words": words })),
            )
            .await?;
        let ack: FilterAck = serde_json::from_value(value)?;
        Ok(ack.added.unwrap_or(words.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn feed_for(server: &MockServer) -> HttpModerationFeed {
        HttpModerationFeed::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    async fn mount_get(server: &MockServer, action: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(query_param("action", action))
            .respond_with(response)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_stats_defaults_missing_counters() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "stats",
            ResponseTemplate::new(200).set_body_json(json!({ "today_bans": 3 })),
        )
        .await;

        let stats = feed_for(&server).await.fetch_stats().await.unwrap();
        assert_eq!(
            stats,
            StatsPayload {
                today_bans: 3,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_logs_unwraps_envelope() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "logs",
            ResponseTemplate::new(200).set_body_json(json!({
                "logs": [
                    { "action": "remove", "user_id": 1, "username": "spammer", "reason": "Спам: скидка",
                      "chat_id": -100, "created_at": "2026-01-16T10:00:00.123456" },
                    { "action": "mute", "user_id": 2, "username": null, "reason": "Мат: слово",
                      "chat_id": -100, "created_at": null }
                ]
            })),
        )
        .await;

        let logs = feed_for(&server).await.fetch_logs().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "remove");
        assert_eq!(logs[1].username, None);
    }

    #[tokio::test]
    async fn test_fetch_daily_stats() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "daily-stats",
            ResponseTemplate::new(200).set_body_json(json!({
                "daily_stats": [
                    { "date": "2026-01-16", "bans": 0, "mutes": 4, "warns": 0, "removes": 9 },
                    { "date": "2026-01-15", "bans": 1, "mutes": 2, "warns": 3, "removes": 4 }
                ]
            })),
        )
        .await;

        let daily = feed_for(&server).await.fetch_daily_stats().await.unwrap();
        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].total(), 13);
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "stats",
            ResponseTemplate::new(500).set_body_json(json!({ "error": "connection refused" })),
        )
        .await;

        let err = feed_for(&server).await.fetch_stats().await.unwrap_err();
        assert!(matches!(err, AppError::Status(500)));
    }

    #[tokio::test]
    async fn test_error_body_with_ok_status_maps_to_upstream() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "logs",
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Unknown endpoint" })),
        )
        .await;

        let err = feed_for(&server).await.fetch_logs().await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(msg) if msg == "Unknown endpoint"));
    }

    #[tokio::test]
    async fn test_malformed_body_maps_to_decode() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "daily-stats",
            ResponseTemplate::new(200).set_body_string("<html>gateway</html>"),
        )
        .await;

        let err = feed_for(&server).await.fetch_daily_stats().await.unwrap_err();
        assert!(matches!(err, AppError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service_maps_to_transport() {
        let feed = HttpModerationFeed::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = feed.fetch_stats().await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_settings_stringifies_scalars() {
        let server = MockServer::start().await;
        mount_get(
            &server,
            "settings",
            ResponseTemplate::new(200)
                .set_body_json(json!({ "mute_duration_minutes": "30", "notify_admins": true })),
        )
        .await;

        let settings = feed_for(&server).await.fetch_settings().await.unwrap();
        assert_eq!(settings["mute_duration_minutes"], "30");
        assert_eq!(settings["notify_admins"], "true");
    }

    #[tokio::test]
    async fn test_save_settings_puts_json_map() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(query_param("action", "settings"))
            .and(body_json(json!({ "max_warnings": "5" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "message": "Settings updated" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let settings = BTreeMap::from([("max_warnings".to_string(), "5".to_string())]);
        feed_for(&server).await.save_settings(&settings).await.unwrap();
    }

    #[tokio::test]
    async fn test_filter_words_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("action", "filters"))
            .and(query_param("type", "profanity"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "words": ["слово"] })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(query_param("action", "filters"))
            .and(body_json(json!({ "type": "spam", "words": ["скидка", "промокод"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "added": 2 })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let feed = feed_for(&server).await;
        assert_eq!(
            feed.fetch_filter_words(FilterKind::Profanity).await.unwrap(),
            vec!["слово".to_string()]
        );
        let added = feed
            .save_filter_words(FilterKind::Spam, &["скидка".into(), "промокод".into()])
            .await
            .unwrap();
        assert_eq!(added, 2);
    }
}
