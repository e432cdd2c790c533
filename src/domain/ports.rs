use crate::domain::model::{CandidatePool, SearchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// 取得遠端頁面原始 HTML；網路、逾時或非 2xx 狀態都是錯誤
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

pub trait Storage: Send + Sync {
    /// 寫入檔案並回傳完整路徑
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ReportViewer: Send + Sync {
    fn open(&self, path: &Path) -> Result<()>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<CandidatePool>;
    async fn transform(&self, pool: CandidatePool) -> Result<SearchOutcome>;
    async fn load(&self, outcome: SearchOutcome) -> Result<String>;
}
