use std::net::SocketAddr;
use std::path::PathBuf;

use crate::ZeroPricePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Optional Pushover credentials. Both fields must be present for delivery
/// to be enabled; a partial pair is treated as absent at load time.
#[derive(Clone, PartialEq, Eq)]
pub struct PushoverCredentials {
    pub api_token: String,
    pub user_key: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub queries_path: PathBuf,
    pub market_origin: String,
    pub pushover: Option<PushoverCredentials>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub poll_interval_secs: u64,
    pub result_cap: usize,
    pub navigation_timeout_secs: u64,
    pub settle_delay_ms: u64,
    pub scan_user_agent: String,
    pub scan_max_retries: u32,
    pub scan_retry_backoff_base_secs: u64,
    pub notify_timeout_secs: u64,
    pub zero_price_policy: ZeroPricePolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("queries_path", &self.queries_path)
            .field("market_origin", &self.market_origin)
            .field("database_url", &"[redacted]")
            .field("pushover", &self.pushover.as_ref().map(|_| "[redacted]"))
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("result_cap", &self.result_cap)
            .field("navigation_timeout_secs", &self.navigation_timeout_secs)
            .field("settle_delay_ms", &self.settle_delay_ms)
            .field("scan_user_agent", &self.scan_user_agent)
            .field("scan_max_retries", &self.scan_max_retries)
            .field(
                "scan_retry_backoff_base_secs",
                &self.scan_retry_backoff_base_secs,
            )
            .field("notify_timeout_secs", &self.notify_timeout_secs)
            .field("zero_price_policy", &self.zero_price_policy)
            .finish()
    }
}
