use crate::domain::model::FranchiseEra;
use crate::utils::error::{Result, SearchError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BASE_URL: &str = "https://www.baseball-reference.com";
pub const FIRST_CUTOFF: i32 = 1953;
pub const LAST_CUTOFF: i32 = 1966;
pub const REPORT_FORMATS: [&str; 3] = ["html", "csv", "json"];
const MAX_RETRY_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub search: SearchSettings,
    pub source: SourceConfig,
    pub eras: Vec<FranchiseEra>,
    pub schedule: ScheduleLayout,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// 生涯必須早於此年開始
    pub first_cutoff: i32,
    /// 生涯必須至少打到此年
    pub last_cutoff: i32,
    pub pitching_marker: String,
    pub letters: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            first_cutoff: FIRST_CUTOFF,
            last_cutoff: LAST_CUTOFF,
            pitching_marker: "Standard Pitching".to_string(),
            letters: ('a'..='z').collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub min_request_interval_ms: u64,
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
            retry_attempts: 0,
            retry_delay_ms: 2000,
            // baseball-reference 限制每分鐘 20 次請求
            min_request_interval_ms: 3000,
            user_agent: concat!("three-braves/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// 賽程表的欄位位置，以 `<td>` 計（不含列首的 `<th>`）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleLayout {
    pub table_id: String,
    pub result_column: usize,
    pub winning_pitcher_column: usize,
    pub loss_marker: String,
}

impl Default for ScheduleLayout {
    fn default() -> Self {
        Self {
            table_id: "team_schedule".to_string(),
            result_column: 5,
            winning_pitcher_column: 12,
            loss_marker: "L".to_string(),
        }
    }
}

impl ScheduleLayout {
    /// 一列至少要有的 `<td>` 數
    pub fn min_cells(&self) -> usize {
        self.result_column.max(self.winning_pitcher_column) + 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
    pub open_in_viewer: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: ".".to_string(),
            formats: vec!["html".to_string()],
            open_in_viewer: true,
        }
    }
}

pub fn default_eras() -> Vec<FranchiseEra> {
    vec![
        FranchiseEra::new("BSN", "Boston"),
        FranchiseEra::new("MLN", "Milwaukee"),
        FranchiseEra::new("ATL", "Atlanta"),
    ]
}

/// 內建設定：1953/1966 與 Boston、Milwaukee、Atlanta 三個時期
impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search: SearchSettings::default(),
            source: SourceConfig::default(),
            eras: default_eras(),
            schedule: ScheduleLayout::default(),
            report: ReportConfig::default(),
        }
    }
}

impl SearchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SearchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置，未提供的區段使用內建值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SearchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BASE_URL})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_positive_number("source.timeout_seconds", self.source.timeout_seconds, 1)?;
        validation::validate_range(
            "source.retry_attempts",
            self.source.retry_attempts,
            0,
            MAX_RETRY_ATTEMPTS,
        )?;
        validation::validate_non_empty_string("source.user_agent", &self.source.user_agent)?;

        if self.search.first_cutoff >= self.search.last_cutoff {
            return Err(SearchError::ConfigValidationError {
                field: "search.first_cutoff".to_string(),
                message: format!(
                    "first_cutoff ({}) must be earlier than last_cutoff ({})",
                    self.search.first_cutoff, self.search.last_cutoff
                ),
            });
        }
        validation::validate_non_empty_string("search.pitching_marker", &self.search.pitching_marker)?;
        validation::validate_non_empty_string("search.letters", &self.search.letters)?;
        if let Some(bad) = self.search.letters.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(SearchError::InvalidConfigValueError {
                field: "search.letters".to_string(),
                value: bad.to_string(),
                reason: "Only lowercase ASCII letters are allowed".to_string(),
            });
        }

        if self.eras.len() != 3 {
            return Err(SearchError::ConfigValidationError {
                field: "eras".to_string(),
                message: format!(
                    "exactly three eras are required (before, between and after the cutoffs), got {}",
                    self.eras.len()
                ),
            });
        }
        for era in &self.eras {
            validation::validate_non_empty_string("eras.code", &era.code)?;
            validation::validate_non_empty_string("eras.city", &era.city)?;
        }
        validation::validate_unique("eras.code", self.eras.iter().map(|e| e.code.as_str()))?;

        validation::validate_non_empty_string("schedule.table_id", &self.schedule.table_id)?;
        validation::validate_non_empty_string("schedule.loss_marker", &self.schedule.loss_marker)?;
        if self.schedule.result_column == self.schedule.winning_pitcher_column {
            return Err(SearchError::ConfigValidationError {
                field: "schedule.winning_pitcher_column".to_string(),
                message: "result and winning pitcher columns must differ".to_string(),
            });
        }

        validation::validate_path("report.output_path", &self.report.output_path)?;
        if self.report.formats.is_empty() {
            return Err(SearchError::MissingConfigError {
                field: "report.formats".to_string(),
            });
        }
        validation::validate_allowed_values("report.formats", &self.report.formats, &REPORT_FORMATS)?;

        Ok(())
    }

    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.search.letters.chars()
    }

    pub fn wants_format(&self, format: &str) -> bool {
        self.report.formats.iter().any(|f| f == format)
    }
}

impl Validate for SearchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
