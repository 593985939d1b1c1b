//! Background scan scheduler.
//!
//! Initialises a [`JobScheduler`] at server startup and registers the
//! repeating scan job. The outer loop is the scheduler itself: it fires on a
//! fixed interval regardless of what the previous cycle did, and every error
//! a cycle produces is caught inside the job closure — nothing escapes to
//! kill the process. Shutdown happens between cycles, when the server drops
//! the scheduler handle during graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::PgPool;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use offerwatch_notify::PushoverNotifier;
use offerwatch_scraper::PageClient;
use offerwatch_watch::WatchContext;

/// Builds and starts the background scheduler.
///
/// Registers the repeating scan job and kicks an immediate first cycle so a
/// fresh deployment starts watching without waiting out the interval.
/// Returns the running [`JobScheduler`] handle, which must be kept alive for
/// the lifetime of the process — dropping it shuts down the loop.
///
/// # Errors
///
/// Returns [`anyhow::Error`] if configuration (queries file, HTTP clients)
/// cannot be built, or [`JobSchedulerError`] via conversion if the scheduler
/// cannot be initialised or started.
pub async fn build_scheduler(
    pool: PgPool,
    config: Arc<offerwatch_core::AppConfig>,
) -> anyhow::Result<JobScheduler> {
    let queries_file = offerwatch_core::load_queries(&config.queries_path)?;
    tracing::info!(
        queries = queries_file.queries.len(),
        interval_secs = config.poll_interval_secs,
        "starting scan scheduler"
    );

    let ctx = Arc::new(WatchContext::from_config(&config, queries_file));
    let client = Arc::new(PageClient::new(
        config.navigation_timeout_secs,
        &config.scan_user_agent,
        config.scan_max_retries,
        config.scan_retry_backoff_base_secs,
    )?);
    let notifier = Arc::new(PushoverNotifier::new(
        config.pushover.clone(),
        config.notify_timeout_secs,
    )?);

    let scheduler = JobScheduler::new().await?;
    register_scan_job(
        &scheduler,
        pool.clone(),
        Arc::clone(&ctx),
        Arc::clone(&client),
        Arc::clone(&notifier),
        config.poll_interval_secs,
    )
    .await?;
    scheduler.start().await?;

    // First cycle runs now; the repeated job takes over afterwards.
    tokio::spawn(async move {
        run_scan_cycle(&pool, &client, &notifier, &ctx).await;
    });

    Ok(scheduler)
}

/// Register the repeating scan job at the configured poll interval.
async fn register_scan_job(
    scheduler: &JobScheduler,
    pool: PgPool,
    ctx: Arc<WatchContext>,
    client: Arc<PageClient>,
    notifier: Arc<PushoverNotifier>,
    poll_interval_secs: u64,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_repeated_async(
        Duration::from_secs(poll_interval_secs),
        move |_uuid, _lock| {
            let pool = pool.clone();
            let ctx = Arc::clone(&ctx);
            let client = Arc::clone(&client);
            let notifier = Arc::clone(&notifier);

            Box::pin(async move {
                run_scan_cycle(&pool, &client, &notifier, &ctx).await;
            })
        },
    )?;

    scheduler.add(job).await?;
    Ok(())
}

/// Drive one scan cycle and absorb its outcome.
///
/// The loop must survive anything a cycle throws at it, so failures end
/// here as log lines — the next tick starts from a clean slate either way.
async fn run_scan_cycle(
    pool: &PgPool,
    client: &PageClient,
    notifier: &PushoverNotifier,
    ctx: &WatchContext,
) {
    tracing::info!("scheduler: starting scan cycle");
    match offerwatch_watch::run_cycle(pool, client, notifier, ctx, "scheduler").await {
        Ok(report) => {
            tracing::info!(
                new = report.offers_new,
                notified = report.notifications_sent,
                failed_queries = report.queries_failed,
                "scheduler: scan cycle finished"
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduler: scan cycle failed");
        }
    }
}
