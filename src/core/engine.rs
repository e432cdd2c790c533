use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::RunMonitor;
use std::time::Instant;

/// 依序執行 extract → transform → load；任何階段失敗都直接回傳，不產生報表
pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
    monitor: RunMonitor,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: RunMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &RunMonitor {
        &self.monitor
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("⚾ Starting pitcher search");

        // Extract
        tracing::info!("Scanning player directory...");
        let started = Instant::now();
        let pool = self.pipeline.extract().await?;
        tracing::info!(
            "Found {} candidate pitchers among {} players",
            pool.candidates.len(),
            pool.directory_size
        );
        self.monitor.record(|c| {
            c.pages_fetched += pool.pages_fetched;
            c.directory_entries += pool.directory_size;
            c.candidates += pool.candidates.len();
        });
        self.monitor.finish_stage("extract", started);

        // Transform
        tracing::info!("Scanning team schedules...");
        let started = Instant::now();
        let outcome = self.pipeline.transform(pool).await?;
        tracing::info!(
            "Scanned {} seasons, {} losses, {} irregular pages/rows",
            outcome.seasons_scanned,
            outcome.loss_rows,
            outcome.issues.len()
        );
        self.monitor.record(|c| {
            c.pages_fetched += outcome.seasons_scanned;
            c.seasons_scanned += outcome.seasons_scanned;
            c.loss_rows += outcome.loss_rows;
            c.scan_issues += outcome.issues.len();
        });
        self.monitor.finish_stage("transform", started);

        // Load
        tracing::info!("Rendering report...");
        let started = Instant::now();
        let output_path = self.pipeline.load(outcome).await?;
        self.monitor.finish_stage("load", started);
        tracing::info!("Report saved to: {}", output_path);

        self.monitor.log_final_stats();
        Ok(output_path)
    }
}
