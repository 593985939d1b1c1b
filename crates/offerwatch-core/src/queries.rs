use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Exclusion terms applied to listing titles, lower-cased. A hit means the
/// poster is seeking rather than selling, or the listing is flagged as
/// reduced-trust merchandise.
pub const DEFAULT_NEGATIVE_KEYWORDS: &[&str] = &[
    "busco", "wanted", "cambio", "permuto", "trade", "broken", "repuesto", "repuestos", "locked",
    "bloqueado", "malo", "for parts",
];

/// One configured marketplace search: the text to search for and an optional
/// inclusive price band. Order in the file is scan order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub min_price: Option<i64>,
    #[serde(default)]
    pub max_price: Option<i64>,
}

impl SearchQuery {
    /// Generate a URL-safe label from the query text, used in logs and
    /// scan-run records.
    #[must_use]
    pub fn slug(&self) -> String {
        self.query
            .to_lowercase()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else if c == ' ' {
                    '-'
                } else {
                    '\0'
                }
            })
            .filter(|&c| c != '\0')
            .collect::<String>()
            .split('-')
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// True when both bounds are configured.
    #[must_use]
    pub fn has_bounds(&self) -> bool {
        self.min_price.is_some() && self.max_price.is_some()
    }
}

#[derive(Debug, Deserialize)]
pub struct QueriesFile {
    pub queries: Vec<SearchQuery>,
    #[serde(default = "default_negative_keywords")]
    pub negative_keywords: Vec<String>,
}

fn default_negative_keywords() -> Vec<String> {
    DEFAULT_NEGATIVE_KEYWORDS
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Load and validate the search-query configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_queries(path: &Path) -> Result<QueriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::QueriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let queries_file: QueriesFile = serde_yaml::from_str(&content)?;

    validate_queries(&queries_file)?;

    Ok(queries_file)
}

fn validate_queries(queries_file: &QueriesFile) -> Result<(), ConfigError> {
    if queries_file.queries.is_empty() {
        return Err(ConfigError::Validation(
            "at least one search query must be configured".to_string(),
        ));
    }

    let mut seen = HashSet::new();

    for q in &queries_file.queries {
        if q.query.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query text must be non-empty".to_string(),
            ));
        }

        if let (Some(min), Some(max)) = (q.min_price, q.max_price) {
            if min > max {
                return Err(ConfigError::Validation(format!(
                    "query '{}' has min_price {} above max_price {}",
                    q.query, min, max
                )));
            }
        }

        if q.min_price.is_some_and(|p| p < 0) || q.max_price.is_some_and(|p| p < 0) {
            return Err(ConfigError::Validation(format!(
                "query '{}' has a negative price bound",
                q.query
            )));
        }

        if !seen.insert(q.query.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate query: '{}'",
                q.query
            )));
        }
    }

    for kw in &queries_file.negative_keywords {
        if kw.trim().is_empty() {
            return Err(ConfigError::Validation(
                "negative keywords must be non-empty".to_string(),
            ));
        }
    }

    Ok(())
}
