use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod queries;

pub use app_config::{AppConfig, Environment, PushoverCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use queries::{load_queries, QueriesFile, SearchQuery, DEFAULT_NEGATIVE_KEYWORDS};

/// How much of a listing was recovered at extraction time.
///
/// `IdOnly` marks offers synthesized by the raw-markup pattern fallback,
/// where only the listing id is reliable and title/price are placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    Full,
    IdOnly,
}

impl Confidence {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::Full => "full",
            Confidence::IdOnly => "id_only",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a parsed price of exactly 0 passes the price-band check.
///
/// Listings priced as "ask seller" parse to 0; under `Reject` they are
/// dropped whenever the query carries bounds, under `PassThrough` they
/// always pass the band check (keyword filtering still applies).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPricePolicy {
    Reject,
    PassThrough,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read queries file {path}: {source}")]
    QueriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse queries file: {0}")]
    QueriesFileParse(#[from] serde_yaml::Error),

    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_display_matches_storage_form() {
        assert_eq!(Confidence::Full.to_string(), "full");
        assert_eq!(Confidence::IdOnly.to_string(), "id_only");
    }

    #[test]
    fn confidence_serializes_snake_case() {
        let json = serde_json::to_string(&Confidence::IdOnly).expect("serialize");
        assert_eq!(json, "\"id_only\"");
    }

    #[test]
    fn zero_price_policy_round_trips_through_serde() {
        let json = serde_json::to_string(&ZeroPricePolicy::PassThrough).expect("serialize");
        let back: ZeroPricePolicy = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, ZeroPricePolicy::PassThrough);
    }
}
