use crate::config::search_config::{SearchConfig, SearchSettings};
use crate::domain::model::{PlayerDirectory, PlayerRecord};
use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use url::Url;

/// 生涯早於 first_cutoff 開始，且至少打到 last_cutoff
pub fn within_window(record: &PlayerRecord, settings: &SearchSettings) -> bool {
    record.first_year() < settings.first_cutoff && record.last_year() >= settings.last_cutoff
}

/// 直接搜尋原始 HTML：部分統計表放在註解裡，解析後看不到
pub fn is_pitcher_page(html: &str, marker: &str) -> bool {
    html.contains(marker)
}

pub fn detail_url(base_url: &str, link: &str) -> Result<String> {
    Ok(Url::parse(base_url)?.join(link)?.to_string())
}

pub fn window_candidates<'a>(
    directory: &'a PlayerDirectory,
    settings: &'a SearchSettings,
) -> impl Iterator<Item = &'a PlayerRecord> + 'a {
    directory
        .values()
        .filter(move |record| within_window(record, settings))
}

/// 先以生涯年份篩選，再逐一抓個人頁確認是投手。抓取失敗直接中止
pub async fn filter_candidates<F>(
    fetcher: &F,
    directory: &PlayerDirectory,
    config: &SearchConfig,
) -> Result<PlayerDirectory>
where
    F: PageFetcher + ?Sized,
{
    let mut candidates = PlayerDirectory::new();

    for record in window_candidates(directory, &config.search) {
        let url = detail_url(&config.source.base_url, record.link())?;
        let html = fetcher.fetch(&url).await?;

        if is_pitcher_page(&html, &config.search.pitching_marker) {
            tracing::debug!(
                "⚾ {} ({}-{}) is a candidate pitcher",
                record.name(),
                record.first_year(),
                record.last_year()
            );
            candidates.insert(record.id().to_string(), record.clone());
        } else {
            tracing::debug!("Skipping {}: no pitching stats", record.name());
        }
    }

    tracing::info!("🎯 {} candidate pitchers", candidates.len());
    Ok(candidates)
}
