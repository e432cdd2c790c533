use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// 執行期間累積的計數
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub pages_fetched: usize,
    pub directory_entries: usize,
    pub candidates: usize,
    pub seasons_scanned: usize,
    pub loss_rows: usize,
    pub scan_issues: usize,
}

#[derive(Debug, Clone)]
pub struct RunStats {
    pub counters: RunCounters,
    pub stage_durations: BTreeMap<String, Duration>,
    pub elapsed_time: Duration,
}

/// 階段計時與計數器。停用時所有記錄都是 no-op
pub struct RunMonitor {
    start_time: Instant,
    counters: Mutex<RunCounters>,
    stages: Mutex<BTreeMap<String, Duration>>,
    enabled: bool,
}

impl RunMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            start_time: Instant::now(),
            counters: Mutex::new(RunCounters::default()),
            stages: Mutex::new(BTreeMap::new()),
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record<F: FnOnce(&mut RunCounters)>(&self, update: F) {
        if !self.enabled {
            return;
        }
        if let Ok(mut counters) = self.counters.lock() {
            update(&mut counters);
        }
    }

    pub fn finish_stage(&self, stage: &str, started: Instant) {
        if !self.enabled {
            return;
        }
        let elapsed = started.elapsed();
        if let Ok(mut stages) = self.stages.lock() {
            stages.insert(stage.to_string(), elapsed);
        }
        self.log_stats(stage);
    }

    pub fn get_stats(&self) -> Option<RunStats> {
        if !self.enabled {
            return None;
        }
        let counters = self.counters.lock().ok()?.clone();
        let stage_durations = self.stages.lock().ok()?.clone();
        Some(RunStats {
            counters,
            stage_durations,
            elapsed_time: self.start_time.elapsed(),
        })
    }

    pub fn log_stats(&self, phase: &str) {
        if let Some(stats) = self.get_stats() {
            let c = &stats.counters;
            tracing::info!(
                "📊 {} - Pages: {}, Entries: {}, Candidates: {}, Seasons: {}, Losses: {}, Issues: {}, Time: {:?}",
                phase,
                c.pages_fetched,
                c.directory_entries,
                c.candidates,
                c.seasons_scanned,
                c.loss_rows,
                c.scan_issues,
                stats.elapsed_time
            );
        }
    }

    pub fn log_final_stats(&self) {
        if let Some(stats) = self.get_stats() {
            for (stage, duration) in &stats.stage_durations {
                tracing::info!("⏱️ {}: {:?}", stage, duration);
            }
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Pages fetched: {}",
                stats.elapsed_time,
                stats.counters.pages_fetched
            );
        }
    }
}

impl Default for RunMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}
