/// Menu fetcher implementations.
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::MenuResult;
use crate::node::MenuNodeData;
use crate::traits::MenuFetcher;

/// Fetches menu documents over HTTP.
///
/// With `cache_bust` enabled a `noCache` timestamp query parameter is added
/// so intermediate caches never serve a stale document.
pub struct HttpMenuFetcher {
    client: reqwest::Client,
    cache_bust: bool,
}

impl HttpMenuFetcher {
    pub fn new() -> Self {
        HttpMenuFetcher {
            client: reqwest::Client::new(),
            cache_bust: true,
        }
    }

    pub fn without_cache_busting() -> Self {
        HttpMenuFetcher {
            client: reqwest::Client::new(),
            cache_bust: false,
        }
    }

    fn request_url(&self, url: &str) -> String {
        if !self.cache_bust {
            return url.to_string();
        }
        let stamp = chrono::Utc::now().timestamp_millis();
        let separator = if url.contains('?') { '&' } else { '?' };
        format!("{url}{separator}noCache={stamp}")
    }
}

impl Default for HttpMenuFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuFetcher for HttpMenuFetcher {
    async fn fetch(&self, url: &str) -> MenuResult<MenuNodeData> {
        let request_url = self.request_url(url);
        debug!(url = %request_url, "fetching menu document");
        let response = self.client.get(&request_url).send().await?.error_for_status()?;
        let data = response.json::<MenuNodeData>().await?;
        Ok(data)
    }
}

/// Reads menu documents from the local filesystem. Used by the CLI host and
/// in tests; the "url" is a plain path.
pub struct FileMenuFetcher;

#[async_trait]
impl MenuFetcher for FileMenuFetcher {
    async fn fetch(&self, url: &str) -> MenuResult<MenuNodeData> {
        let path = PathBuf::from(url);
        debug!(path = %path.display(), "reading menu document");
        let raw = tokio::fs::read_to_string(&path).await?;
        let data = serde_json::from_str(&raw)?;
        Ok(data)
    }
}
