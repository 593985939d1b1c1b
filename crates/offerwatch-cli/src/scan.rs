//! `scan` — run one scan cycle from the command line.

use offerwatch_notify::PushoverNotifier;
use offerwatch_scraper::PageClient;
use offerwatch_watch::WatchContext;

/// Runs a single cycle against the configured queries and prints the counts.
///
/// `no_notify` forces a disabled notifier, useful when backfilling the store
/// without paging anyone.
pub(super) async fn run(no_notify: bool) -> anyhow::Result<()> {
    let config = offerwatch_core::load_app_config()?;
    let queries_file = offerwatch_core::load_queries(&config.queries_path)?;

    let pool_config = offerwatch_db::PoolConfig::from_app_config(&config);
    let pool = offerwatch_db::connect_pool(&config.database_url, pool_config).await?;
    offerwatch_db::run_migrations(&pool).await?;

    let client = PageClient::new(
        config.navigation_timeout_secs,
        &config.scan_user_agent,
        config.scan_max_retries,
        config.scan_retry_backoff_base_secs,
    )?;
    let credentials = if no_notify {
        None
    } else {
        config.pushover.clone()
    };
    let notifier = PushoverNotifier::new(credentials, config.notify_timeout_secs)?;

    let ctx = WatchContext::from_config(&config, queries_file);
    let report = offerwatch_watch::run_cycle(&pool, &client, &notifier, &ctx, "cli").await?;

    println!(
        "scanned {} queries ({} failed): {} candidates, {} new offers, {} notifications",
        report.queries_total,
        report.queries_failed,
        report.candidates_seen,
        report.offers_new,
        report.notifications_sent
    );

    Ok(())
}
