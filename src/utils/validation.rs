use crate::utils::error::{Result, SearchError};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl ToString, reason: impl Into<String>) -> SearchError {
    SearchError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

/// 站台網址只接受 http/https
pub fn validate_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).map_err(|e| invalid(field, value, format!("Invalid URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(field, value, format!("Unsupported URL scheme: {}", scheme))),
    }
}

/// 報表輸出目錄
pub fn validate_path(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || value.contains('\0') {
        return Err(invalid(field, value, "Path must be non-empty and free of NUL bytes"));
    }
    Ok(())
}

pub fn validate_positive_number(field: &str, value: u64, min: u64) -> Result<()> {
    (value >= min)
        .then_some(())
        .ok_or_else(|| invalid(field, value, format!("Must be at least {}", min)))
}

pub fn validate_non_empty_string(field: &str, value: &str) -> Result<()> {
    (!value.trim().is_empty())
        .then_some(())
        .ok_or_else(|| invalid(field, value, "Must not be blank"))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value < min || value > max {
        let reason = format!("Must be between {} and {}", min, max);
        return Err(invalid(field, value, reason));
    }
    Ok(())
}

/// 每個值都必須在允許清單中
pub fn validate_allowed_values(field_name: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed.iter().copied().collect();

    match values.iter().find(|value| !allowed_set.contains(value.as_str())) {
        Some(value) => Err(invalid(
            field_name,
            value,
            format!("Unsupported value. Allowed values: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

pub fn validate_unique<'a, I>(field_name: &str, values: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for value in values {
        if !seen.insert(value) {
            return Err(invalid(field_name, value, "Duplicate value"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.base_url", "https://example.com").is_ok());
        assert!(validate_url("source.base_url", "http://example.com").is_ok());
        assert!(validate_url("source.base_url", "").is_err());
        assert!(validate_url("source.base_url", "invalid-url").is_err());
        assert!(validate_url("source.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.timeout_seconds", 5, 1).is_ok());
        assert!(validate_positive_number("source.timeout_seconds", 0, 1).is_err());
    }

    #[test]
    fn test_validate_allowed_values() {
        let formats = vec!["html".to_string(), "csv".to_string()];
        assert!(validate_allowed_values("report.formats", &formats, &["html", "csv", "json"]).is_ok());

        let invalid = vec!["xlsx".to_string()];
        assert!(validate_allowed_values("report.formats", &invalid, &["html", "csv", "json"]).is_err());
    }

    #[test]
    fn test_validate_unique() {
        assert!(validate_unique("eras.code", ["BSN", "MLN", "ATL"]).is_ok());
        assert!(validate_unique("eras.code", ["BSN", "BSN", "ATL"]).is_err());
    }

    #[test]
    fn test_validate_path_and_blank_strings() {
        assert!(validate_path("report.output_path", "./reports").is_ok());
        assert!(validate_path("report.output_path", "").is_err());
        assert!(validate_path("report.output_path", "bad\0path").is_err());
        assert!(validate_non_empty_string("search.letters", "  ").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.retry_attempts", 3, 0, 5).is_ok());
        assert!(validate_range("source.retry_attempts", 6, 0, 5).is_err());
    }
}
