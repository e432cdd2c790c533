use crate::config::search_config::SearchConfig;
use crate::core::directory::scan_directory;
use crate::core::eligibility::{filter_candidates, window_candidates};
use crate::core::eras::derive_eras;
use crate::core::ledger::seed_ledger;
use crate::core::report::{build_report_rows, render_csv, render_html, render_json, report_file_stem};
use crate::core::schedule::scan_schedules;
use crate::domain::model::{CandidatePool, SearchOutcome};
use crate::domain::ports::{PageFetcher, Pipeline, ReportViewer, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// 找出在 Boston、Milwaukee、Atlanta 三個時期都拿過勝投的投手
///
/// - extract: 字母索引 → 生涯年份篩選 → 個人頁確認投手
/// - transform: 推算三個時期的賽季範圍 → 掃描賽程頁 → 勝投帳本
/// - load: 產生報表檔案並開啟
pub struct PitcherSearchPipeline<F: PageFetcher, S: Storage, V: ReportViewer> {
    fetcher: F,
    storage: S,
    viewer: V,
    config: SearchConfig,
}

impl<F: PageFetcher, S: Storage, V: ReportViewer> PitcherSearchPipeline<F, S, V> {
    pub fn new(fetcher: F, storage: S, viewer: V, config: SearchConfig) -> Self {
        Self {
            fetcher,
            storage,
            viewer,
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher, S: Storage, V: ReportViewer> Pipeline for PitcherSearchPipeline<F, S, V> {
    async fn extract(&self) -> Result<CandidatePool> {
        let directory = scan_directory(&self.fetcher, &self.config).await?;
        let detail_pages = window_candidates(&directory, &self.config.search).count();
        tracing::info!(
            "🔎 {} players started before {} and lasted through {}",
            detail_pages,
            self.config.search.first_cutoff,
            self.config.search.last_cutoff
        );

        let candidates = filter_candidates(&self.fetcher, &directory, &self.config).await?;

        Ok(CandidatePool {
            candidates,
            directory_size: directory.len(),
            pages_fetched: self.config.letters().count() + detail_pages,
        })
    }

    async fn transform(&self, pool: CandidatePool) -> Result<SearchOutcome> {
        let eras = derive_eras(&self.config.eras, &pool.candidates, &self.config.search);
        let ledger = seed_ledger(&pool.candidates);

        let scan = scan_schedules(&self.fetcher, &self.config, &eras, ledger).await?;

        Ok(SearchOutcome {
            candidates: pool.candidates,
            eras,
            ledger: scan.ledger,
            issues: scan.issues,
            seasons_scanned: scan.seasons_scanned,
            loss_rows: scan.loss_rows,
        })
    }

    async fn load(&self, outcome: SearchOutcome) -> Result<String> {
        let rows = build_report_rows(&outcome.ledger, &outcome.candidates, &outcome.eras);
        let generated_at = chrono::Utc::now();
        let stem = report_file_stem();

        let codes: Vec<&str> = outcome.eras.iter().map(|era| era.code.as_str()).collect();
        for id in outcome.ledger.sweepers(&codes) {
            let name = outcome
                .candidates
                .get(id)
                .map(|record| record.name())
                .unwrap_or(id);
            tracing::info!("🏅 {} beat the Braves in every city", name);
        }

        let mut written = Vec::new();
        for format in &self.config.report.formats {
            let content = match format.as_str() {
                "html" => render_html(&rows, &outcome.eras, generated_at),
                "csv" => render_csv(&rows)?,
                "json" => render_json(&rows, &outcome.eras, generated_at)?,
                other => {
                    tracing::warn!("Skipping unsupported report format: {}", other);
                    continue;
                }
            };
            let filename = format!("{}.{}", stem, format);
            let path = self.storage.write_file(&filename, content.as_bytes()).await?;
            tracing::debug!("Wrote {} ({} bytes)", path, content.len());
            written.push((format.as_str(), path));
        }

        let primary = written
            .iter()
            .find(|(format, _)| *format == "html")
            .or_else(|| written.first())
            .map(|(_, path)| path.clone())
            .unwrap_or_default();

        if self.config.report.open_in_viewer && self.config.wants_format("html") {
            // 報表已寫出，開不起來只警告
            if let Err(e) = self.viewer.open(Path::new(&primary)) {
                tracing::warn!("⚠️ {} ({})", e, e.recovery_suggestion());
            }
        }

        Ok(primary)
    }
}
