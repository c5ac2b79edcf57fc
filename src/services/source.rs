// src/services/source.rs

//! Status page fetching.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::{FeedEntry, StatusConfig, StatusIndex, StatusMeta, StatusSnapshot};
use crate::services::feed::parse_rss;
use crate::utils::http::{create_async_client, fetch_json, fetch_text};

/// Where status data comes from. Every call fetches fresh data.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch page metadata and the incident summary.
    async fn fetch_snapshot(&self) -> Result<StatusSnapshot>;

    /// Fetch and parse the incident history feed.
    async fn fetch_feed(&self) -> Result<Vec<FeedEntry>>;
}

/// [`StatusSource`] backed by the public status page endpoints.
pub struct HttpStatusSource {
    client: Client,
    index_url: String,
    meta_url: String,
    feed_url: String,
}

impl HttpStatusSource {
    /// Create a source with its own HTTP client.
    pub fn new(config: &StatusConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, config))
    }

    /// Create a source that shares an existing HTTP client.
    pub fn with_client(client: Client, config: &StatusConfig) -> Self {
        Self {
            client,
            index_url: config.index_url.clone(),
            meta_url: config.meta_url.clone(),
            feed_url: config.feed_url.clone(),
        }
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch_snapshot(&self) -> Result<StatusSnapshot> {
        let (meta, index) = futures::try_join!(
            fetch_json::<StatusMeta>(&self.client, &self.meta_url),
            fetch_json::<StatusIndex>(&self.client, &self.index_url),
        )?;
        log::info!(
            "Fetched status snapshot: {} components, {} incidents",
            index.components.len(),
            index.incidents.len()
        );
        Ok(StatusSnapshot::assemble(meta, index))
    }

    async fn fetch_feed(&self) -> Result<Vec<FeedEntry>> {
        let xml = fetch_text(&self.client, &self.feed_url).await?;
        let entries = parse_rss(&xml)?;
        log::info!("Fetched feed: {} entries", entries.len());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::error::AppError;

    fn config_for(server: &MockServer) -> StatusConfig {
        StatusConfig {
            index_url: server.url("/index.json"),
            meta_url: server.url("/api/v2/status.json"),
            feed_url: server.url("/history.rss"),
            ..StatusConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_snapshot_combines_endpoints() {
        let server = MockServer::start();
        let meta = server.mock(|when, then| {
            when.method(GET).path("/api/v2/status.json");
            then.status(200)
                .body(r#"{"page": {"id": "x", "time_zone": "America/Los_Angeles"}}"#);
        });
        let index = server.mock(|when, then| {
            when.method(GET).path("/index.json");
            then.status(200).body(
                r#"{"components": [{"name": "API"}, {"name": "ChatGPT"}],
                    "incidents": [{"created_at": "2024-01-09T08:00:00.000-08:00", "incident_updates": []}]}"#,
            );
        });

        let source = HttpStatusSource::new(&config_for(&server)).unwrap();
        let snapshot = source.fetch_snapshot().await.unwrap();

        meta.assert();
        index.assert();
        assert_eq!(snapshot.timezone.as_deref(), Some("America/Los_Angeles"));
        assert_eq!(snapshot.components.len(), 2);
        assert_eq!(snapshot.incidents.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_snapshot_http_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/v2/status.json");
            then.status(503);
        });
        server.mock(|when, then| {
            when.method(GET).path("/index.json");
            then.status(200).body(r#"{"components": [], "incidents": []}"#);
        });

        let source = HttpStatusSource::new(&config_for(&server)).unwrap();
        let err = source.fetch_snapshot().await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }

    #[tokio::test]
    async fn test_fetch_feed() {
        let server = MockServer::start();
        let feed = server.mock(|when, then| {
            when.method(GET).path("/history.rss");
            then.status(200).body(
                "<rss><channel><item><title>Outage</title><description>&lt;p&gt;Down&lt;/p&gt;</description>\
                 <pubDate>Tue, 09 Jan 2024 18:00:00 +0000</pubDate><link>https://example.com/1</link></item></channel></rss>",
            );
        });

        let source = HttpStatusSource::new(&config_for(&server)).unwrap();
        let entries = source.fetch_feed().await.unwrap();

        feed.assert();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Outage");
        assert_eq!(entries[0].description, "<p>Down</p>");
    }
}
