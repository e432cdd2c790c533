use crate::domain::ports::{PageFetcher, Storage};
use crate::utils::error::{Result, SearchError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// 記憶體中的頁面集合；未登記的 URL 一律視為抓取失敗
#[derive(Default)]
pub struct MockFetcher {
    pages: HashMap<String, String>,
    statuses: HashMap<String, u16>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        if let Some(status) = self.statuses.get(url) {
            return Err(SearchError::HttpStatusError {
                url: url.to_string(),
                status: *status,
            });
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| SearchError::fetch(url, "connection refused"))
    }
}

#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

impl Storage for MockStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), data.to_vec());
        Ok(format!("memory/{}", path))
    }
}
