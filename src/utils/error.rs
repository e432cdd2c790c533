use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to fetch {url}: {reason}")]
    FetchError { url: String, reason: String },

    #[error("HTTP {status} returned by {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Player {id} has reversed career years {first}-{last}")]
    InvalidPlayerRecord { id: String, first: i32, last: i32 },

    #[error("Could not open report viewer: {message}")]
    ViewerError { message: String },
}

pub type Result<T> = std::result::Result<T, SearchError>;

/// 錯誤分類，用於日誌與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SearchError {
    pub fn fetch(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        SearchError::FetchError {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::FetchError { .. } | SearchError::HttpStatusError { .. } => {
                ErrorCategory::Network
            }
            SearchError::UrlError(_)
            | SearchError::ConfigValidationError { .. }
            | SearchError::InvalidConfigValueError { .. }
            | SearchError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SearchError::CsvError(_)
            | SearchError::SerializationError(_)
            | SearchError::InvalidPlayerRecord { .. } => ErrorCategory::Data,
            SearchError::IoError(_) | SearchError::ViewerError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 報表已寫出，只是無法開啟
            SearchError::ViewerError { .. } => ErrorSeverity::Low,
            SearchError::FetchError { .. } | SearchError::HttpStatusError { .. } => {
                ErrorSeverity::Medium
            }
            SearchError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    /// 傳輸層錯誤是否值得重試 (只針對 GET)
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::FetchError { .. } => true,
            SearchError::HttpStatusError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SearchError::FetchError { .. } => {
                "Check the network connection or raise source.timeout_seconds / source.retry_attempts"
                    .to_string()
            }
            SearchError::HttpStatusError { status, .. } if *status == 429 => {
                "The site is rate limiting requests; raise source.min_request_interval_ms".to_string()
            }
            SearchError::HttpStatusError { .. } => {
                "Verify source.base_url and the era team codes".to_string()
            }
            SearchError::UrlError(_) => "Verify source.base_url is an absolute http(s) URL".to_string(),
            SearchError::ConfigValidationError { field, .. }
            | SearchError::InvalidConfigValueError { field, .. }
            | SearchError::MissingConfigError { field } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            SearchError::IoError(_) => "Check permissions on report.output_path".to_string(),
            SearchError::ViewerError { .. } => {
                "Open the report file manually or pass --no-open".to_string()
            }
            SearchError::CsvError(_)
            | SearchError::SerializationError(_)
            | SearchError::InvalidPlayerRecord { .. } => {
                "Re-run with --verbose and inspect the offending page".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not download a page, search aborted: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}
