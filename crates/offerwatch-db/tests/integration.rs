//! Offline unit tests for offerwatch-db pool configuration and row types.
//! These tests do not require a live database connection.

use offerwatch_core::{AppConfig, Environment, ZeroPricePolicy};
use offerwatch_db::{OfferRow, PoolConfig, ScanRunRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        queries_path: PathBuf::from("./config/queries.yaml"),
        market_origin: "https://www.facebook.com".to_string(),
        pushover: None,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        poll_interval_secs: 300,
        result_cap: 15,
        navigation_timeout_secs: 60,
        settle_delay_ms: 2000,
        scan_user_agent: "ua".to_string(),
        scan_max_retries: 2,
        scan_retry_backoff_base_secs: 5,
        notify_timeout_secs: 10,
        zero_price_policy: ZeroPricePolicy::Reject,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`OfferRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn offer_row_has_expected_fields() {
    use chrono::Utc;

    let row = OfferRow {
        id: "12345678901".to_string(),
        title: "Mountain Bike Like New".to_string(),
        price_text: "$45.000".to_string(),
        price_numeric: 45_000_i64,
        confidence: "full".to_string(),
        first_seen_at: Utc::now(),
    };

    assert_eq!(row.id, "12345678901");
    assert_eq!(row.title, "Mountain Bike Like New");
    assert_eq!(row.price_text, "$45.000");
    assert_eq!(row.price_numeric, 45_000);
    assert_eq!(row.confidence, "full");
}

/// Compile-time smoke test: confirm that [`ScanRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn scan_run_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = ScanRunRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        trigger_source: "scheduler".to_string(),
        status: "running".to_string(),
        started_at: Utc::now(),
        completed_at: None,
        queries_total: 0_i32,
        queries_failed: 0_i32,
        candidates_seen: 0_i32,
        offers_new: 0_i32,
        notifications_sent: 0_i32,
        error_message: None,
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.trigger_source, "scheduler");
    assert_eq!(row.status, "running");
    assert!(row.completed_at.is_none());
    assert!(row.error_message.is_none());
}
