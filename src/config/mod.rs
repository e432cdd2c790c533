pub mod search_config;

pub use search_config::SearchConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

/// 命令列參數；未指定的值來自設定檔或內建預設
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "three-braves")]
#[command(about = "Find pitchers who beat the Boston, Milwaukee and Atlanta Braves")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the report is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Report formats (html, csv, json)
    #[arg(long, value_delimiter = ',')]
    pub format: Vec<String>,

    /// Only scan these directory letters (e.g. "rs")
    #[arg(long)]
    pub letters: Option<String>,

    /// Bounded retries for failed page fetches
    #[arg(long)]
    pub retry_attempts: Option<u32>,

    /// Do not open the HTML report when done
    #[arg(long)]
    pub no_open: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Log per-stage timings and counters
    #[arg(long)]
    pub monitor: bool,

    /// Show what would be fetched without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔 (若有) 並套用命令列覆蓋
    pub fn resolve(&self) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_file(path)?,
            None => SearchConfig::default(),
        };

        if let Some(output_path) = &self.output_path {
            config.report.output_path = output_path.clone();
        }
        if !self.format.is_empty() {
            config.report.formats = self.format.clone();
        }
        if let Some(letters) = &self.letters {
            config.search.letters = letters.clone();
        }
        if let Some(retry_attempts) = self.retry_attempts {
            config.source.retry_attempts = retry_attempts;
        }
        if self.no_open {
            config.report.open_in_viewer = false;
        }

        Ok(config)
    }
}
