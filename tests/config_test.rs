#![cfg(feature = "cli")]

use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;
use three_braves::utils::error::SearchError;
use three_braves::utils::validation::Validate;
use three_braves::{CliConfig, SearchConfig};

const CONFIG: &str = r#"
[search]
letters = "abc"

[source]
base_url = "${THREE_BRAVES_TEST_BASE_URL}"
min_request_interval_ms = 500
retry_attempts = 2

[report]
output_path = "reports"
formats = ["html", "json"]
open_in_viewer = true
"#;

fn config_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_config_with_env_substitution() {
    std::env::set_var("THREE_BRAVES_TEST_BASE_URL", "http://mirror.test");
    let file = config_file(CONFIG);

    let config = SearchConfig::from_file(file.path()).unwrap();

    assert_eq!(config.source.base_url, "http://mirror.test");
    assert_eq!(config.source.min_request_interval_ms, 500);
    assert_eq!(config.source.retry_attempts, 2);
    assert_eq!(config.search.letters, "abc");
    // 未提供的區段使用內建值
    assert_eq!(config.search.first_cutoff, 1953);
    assert_eq!(config.eras.len(), 3);
    assert_eq!(config.schedule.winning_pitcher_column, 12);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cli_flags_override_config_file() {
    std::env::set_var("THREE_BRAVES_TEST_BASE_URL", "http://mirror.test");
    let file = config_file(CONFIG);
    let path = file.path().to_str().unwrap();

    let cli = CliConfig::parse_from([
        "three-braves",
        "--config",
        path,
        "--letters",
        "w",
        "--format",
        "csv",
        "--no-open",
        "--retry-attempts",
        "1",
    ]);
    let config = cli.resolve().unwrap();

    assert_eq!(config.search.letters, "w");
    assert_eq!(config.report.formats, vec!["csv"]);
    assert!(!config.report.open_in_viewer);
    assert_eq!(config.source.retry_attempts, 1);
    assert_eq!(config.report.output_path, "reports");
}

#[test]
fn test_invalid_config_is_rejected() {
    let file = config_file(
        r#"
[search]
first_cutoff = 1966
last_cutoff = 1953

[[eras]]
code = "BSN"
city = "Boston"
"#,
    );

    let config = SearchConfig::from_file(file.path()).unwrap();
    let err = config.validate().unwrap_err();

    assert!(matches!(err, SearchError::ConfigValidationError { .. }));
    assert!(!err.recovery_suggestion().is_empty());
}

#[test]
fn test_malformed_toml() {
    let err = SearchConfig::from_toml_str("[search\nletters = ").unwrap_err();
    assert!(matches!(
        err,
        SearchError::ConfigValidationError { ref field, .. } if field == "toml_parsing"
    ));
}
