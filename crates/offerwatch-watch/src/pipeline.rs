//! One scan cycle: fetch → settle → extract → filter → register → notify.

use std::time::Duration;

use sqlx::PgPool;

use offerwatch_db::{NewOffer, RegisterOutcome, ScanRunTotals};
use offerwatch_notify::{Delivery, PushoverNotifier};
use offerwatch_scraper::{extract_candidates, normalize_and_filter, PageClient};

use crate::error::WatchError;
use crate::types::{CycleReport, WatchContext};

/// Runs one full pass over all configured queries.
///
/// A `scan_runs` row brackets the cycle (running → succeeded/failed) so the
/// viewer can show per-cycle outcomes. Query-level failures (navigation
/// timeout, unexpected status) are logged and skipped; only a cycle where
/// every query failed is recorded as a failed run.
///
/// # Errors
///
/// - [`WatchError::Db`] — the scan-run bookkeeping itself failed.
/// - [`WatchError::AllQueriesFailed`] — no query produced a page this cycle.
pub async fn run_cycle(
    pool: &PgPool,
    client: &PageClient,
    notifier: &PushoverNotifier,
    ctx: &WatchContext,
    trigger_source: &str,
) -> Result<CycleReport, WatchError> {
    let run = offerwatch_db::start_scan_run(pool, trigger_source).await?;

    let mut report = CycleReport {
        queries_total: ctx.queries.len(),
        ..CycleReport::default()
    };

    for query in &ctx.queries {
        let slug = query.slug();
        match process_query(pool, client, notifier, ctx, query).await {
            Ok(outcome) => {
                report.candidates_seen += outcome.candidates_seen;
                report.offers_accepted += outcome.offers_accepted;
                report.offers_new += outcome.offers_new;
                report.notifications_sent += outcome.notifications_sent;
                tracing::info!(
                    query = %slug,
                    candidates = outcome.candidates_seen,
                    accepted = outcome.offers_accepted,
                    new = outcome.offers_new,
                    "query scanned"
                );
            }
            Err(e) => {
                report.queries_failed += 1;
                tracing::warn!(query = %slug, error = %e, "query skipped this cycle");
            }
        }
    }

    if report.queries_total > 0 && report.queries_failed == report.queries_total {
        let message = format!("all {} queries failed", report.queries_failed);
        if let Err(e) = offerwatch_db::fail_scan_run(pool, run.id, &message).await {
            tracing::error!(run_id = run.id, error = %e, "failed to record failed scan run");
        }
        return Err(WatchError::AllQueriesFailed {
            failed: report.queries_failed,
        });
    }

    offerwatch_db::complete_scan_run(pool, run.id, totals_from_report(&report)).await?;

    tracing::info!(
        run_id = run.id,
        candidates = report.candidates_seen,
        new = report.offers_new,
        notified = report.notifications_sent,
        failed_queries = report.queries_failed,
        "scan cycle complete"
    );

    Ok(report)
}

/// Per-query slice of the cycle counters.
#[derive(Debug, Default)]
struct QueryOutcome {
    candidates_seen: usize,
    offers_accepted: usize,
    offers_new: usize,
    notifications_sent: usize,
}

/// Scans one query: navigate, settle, extract, then push every accepted
/// candidate through dedup and notification.
async fn process_query(
    pool: &PgPool,
    client: &PageClient,
    notifier: &PushoverNotifier,
    ctx: &WatchContext,
    query: &offerwatch_core::SearchQuery,
) -> Result<QueryOutcome, offerwatch_scraper::ScraperError> {
    let markup = client.fetch_search_page(&ctx.market_origin, query).await?;

    // Settle: a bounded pause before extraction. Lazy-rendered sources need
    // it to finish materializing; for static markup it spaces requests.
    if ctx.settle_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(ctx.settle_delay_ms)).await;
    }

    let candidates = extract_candidates(&markup, &ctx.market_origin, ctx.result_cap);

    let mut outcome = QueryOutcome {
        candidates_seen: candidates.len(),
        ..QueryOutcome::default()
    };

    for candidate in candidates {
        let offer = normalize_and_filter(
            candidate,
            query,
            ctx.zero_price_policy,
            &ctx.negative_keywords,
        );

        let Some(reason) = offer.rejection_reason() else {
            outcome.offers_accepted += 1;
            register_and_notify(pool, notifier, &offer, &mut outcome).await;
            continue;
        };
        tracing::debug!(
            id = %offer.candidate.external_id,
            reason = reason.as_str(),
            "candidate rejected"
        );
    }

    Ok(outcome)
}

/// Registers one accepted offer and fires its notification when new.
///
/// The dedup record is written regardless of notification outcome —
/// delivery is a side effect of registration, not a precondition. A
/// registration error skips just this candidate.
async fn register_and_notify(
    pool: &PgPool,
    notifier: &PushoverNotifier,
    offer: &offerwatch_scraper::NormalizedOffer,
    outcome: &mut QueryOutcome,
) {
    let candidate = &offer.candidate;
    let new_offer = NewOffer {
        id: candidate.external_id.clone(),
        title: candidate.title.clone(),
        price_text: candidate.price_text.clone(),
        price_numeric: offer.price_numeric,
        confidence: candidate.confidence,
    };

    match offerwatch_db::register_offer(pool, &new_offer).await {
        Ok(RegisterOutcome::New) => {
            outcome.offers_new += 1;
            tracing::info!(
                id = %candidate.external_id,
                title = %candidate.title,
                price = %candidate.price_text,
                "new offer detected"
            );
            match notifier
                .notify_offer(&candidate.title, &candidate.price_text, &candidate.link)
                .await
            {
                Ok(Delivery::Sent) => outcome.notifications_sent += 1,
                Ok(Delivery::SkippedNoCredentials) => {}
                Err(e) => {
                    tracing::warn!(id = %candidate.external_id, error = %e, "notification failed");
                }
            }
        }
        Ok(RegisterOutcome::Duplicate) => {
            tracing::debug!(id = %candidate.external_id, "offer already known");
        }
        Err(e) => {
            tracing::warn!(id = %candidate.external_id, error = %e, "offer registration failed");
        }
    }
}

fn totals_from_report(report: &CycleReport) -> ScanRunTotals {
    let clamp = |n: usize| i32::try_from(n).unwrap_or(i32::MAX);
    ScanRunTotals {
        queries_total: clamp(report.queries_total),
        queries_failed: clamp(report.queries_failed),
        candidates_seen: clamp(report.candidates_seen),
        offers_new: clamp(report.offers_new),
        notifications_sent: clamp(report.notifications_sent),
    }
}
