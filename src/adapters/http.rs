use crate::config::search_config::SourceConfig;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// reqwest 實作的 PageFetcher：逐一請求、每次請求有逾時、請求之間保持最小間隔
pub struct HttpFetcher {
    client: Client,
    retry_attempts: u32,
    retry_delay: Duration,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpFetcher {
    pub fn new(source: &SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(source.timeout_seconds))
            .user_agent(source.user_agent.clone())
            .build()
            .map_err(|e| SearchError::ConfigValidationError {
                field: "source".to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            retry_attempts: source.retry_attempts,
            retry_delay: Duration::from_millis(source.retry_delay_ms),
            min_interval: Duration::from_millis(source.min_request_interval_ms),
            last_request: Mutex::new(None),
        })
    }

    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        tracing::debug!("📡 GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::fetch(url, e))?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(SearchError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SearchError::fetch(url, e))
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            self.pace().await;
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "⚠️ {} (retry {}/{} in {:?})",
                        e,
                        attempt,
                        self.retry_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
