//! Live integration tests for offerwatch-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/offerwatch-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use offerwatch_core::Confidence;
use offerwatch_db::{
    complete_scan_run, fail_scan_run, get_offer, list_offers, list_scan_runs, register_offer,
    start_scan_run, NewOffer, OfferFilter, RegisterOutcome, ScanRunTotals,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn make_offer(id: &str, title: &str, price_numeric: i64) -> NewOffer {
    NewOffer {
        id: id.to_string(),
        title: title.to_string(),
        price_text: format!("${price_numeric}"),
        price_numeric,
        confidence: Confidence::Full,
    }
}

// ---------------------------------------------------------------------------
// Section 1: Dedup registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn register_offer_returns_new_for_unseen_id(pool: sqlx::PgPool) {
    let outcome = register_offer(&pool, &make_offer("12345678901", "Mountain Bike", 45_000))
        .await
        .expect("register_offer failed");

    assert_eq!(outcome, RegisterOutcome::New);

    let stored = get_offer(&pool, "12345678901")
        .await
        .expect("get_offer failed")
        .expect("offer should exist");
    assert_eq!(stored.title, "Mountain Bike");
    assert_eq!(stored.price_numeric, 45_000);
    assert_eq!(stored.confidence, "full");
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_offer_is_idempotent_per_id(pool: sqlx::PgPool) {
    let first = register_offer(&pool, &make_offer("12345678901", "Mountain Bike", 45_000))
        .await
        .expect("first registration failed");
    assert_eq!(first, RegisterOutcome::New);

    // Same id again, in what would be a later cycle.
    let second = register_offer(&pool, &make_offer("12345678901", "Mountain Bike", 45_000))
        .await
        .expect("second registration failed");
    assert_eq!(second, RegisterOutcome::Duplicate);

    let third = register_offer(&pool, &make_offer("12345678901", "Mountain Bike", 45_000))
        .await
        .expect("third registration failed");
    assert_eq!(third, RegisterOutcome::Duplicate);
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_registration_never_overwrites_first_sighting(pool: sqlx::PgPool) {
    register_offer(&pool, &make_offer("12345678901", "Original Title", 45_000))
        .await
        .expect("first registration failed");

    // A later sighting with different fields must not change the row.
    let outcome = register_offer(&pool, &make_offer("12345678901", "Relisted Title", 99_000))
        .await
        .expect("duplicate registration failed");
    assert_eq!(outcome, RegisterOutcome::Duplicate);

    let stored = get_offer(&pool, "12345678901")
        .await
        .expect("get_offer failed")
        .expect("offer should exist");
    assert_eq!(stored.title, "Original Title");
    assert_eq!(stored.price_numeric, 45_000);
}

#[sqlx::test(migrations = "../../migrations")]
async fn register_offer_stores_id_only_confidence(pool: sqlx::PgPool) {
    let offer = NewOffer {
        id: "98765432109".to_string(),
        title: "listing 98765432109".to_string(),
        price_text: String::new(),
        price_numeric: 0,
        confidence: Confidence::IdOnly,
    };
    register_offer(&pool, &offer).await.expect("register failed");

    let stored = get_offer(&pool, "98765432109")
        .await
        .expect("get_offer failed")
        .expect("offer should exist");
    assert_eq!(stored.confidence, "id_only");
}

// ---------------------------------------------------------------------------
// Section 2: Viewer reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn list_offers_orders_newest_first(pool: sqlx::PgPool) {
    for (i, id) in ["11111111111", "22222222222", "33333333333"].iter().enumerate() {
        register_offer(&pool, &make_offer(id, &format!("Offer {i}"), 50_000))
            .await
            .expect("register failed");
        // Distinct timestamps so the ordering is deterministic.
        sqlx::query("UPDATE offers SET first_seen_at = NOW() - make_interval(mins => $1) WHERE id = $2")
            .bind(i32::try_from(2 - i).expect("small index"))
            .bind(id)
            .execute(&pool)
            .await
            .expect("timestamp adjust failed");
    }

    let rows = list_offers(&pool, &OfferFilter::default())
        .await
        .expect("list_offers failed");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].id, "33333333333", "newest first");
    assert_eq!(rows[2].id, "11111111111", "oldest last");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_offers_filters_title_case_insensitively(pool: sqlx::PgPool) {
    register_offer(&pool, &make_offer("11111111111", "Mountain Bike Like New", 45_000))
        .await
        .expect("register failed");
    register_offer(&pool, &make_offer("22222222222", "Guitarra Electrica", 80_000))
        .await
        .expect("register failed");

    let filter = OfferFilter {
        title_contains: Some("mountain".to_string()),
        ..OfferFilter::default()
    };
    let rows = list_offers(&pool, &filter).await.expect("list_offers failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "11111111111");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_offers_filters_price_band(pool: sqlx::PgPool) {
    register_offer(&pool, &make_offer("11111111111", "Cheap", 10_000))
        .await
        .expect("register failed");
    register_offer(&pool, &make_offer("22222222222", "Mid", 50_000))
        .await
        .expect("register failed");
    register_offer(&pool, &make_offer("33333333333", "Expensive", 500_000))
        .await
        .expect("register failed");

    let filter = OfferFilter {
        min_price: Some(30_000),
        max_price: Some(200_000),
        ..OfferFilter::default()
    };
    let rows = list_offers(&pool, &filter).await.expect("list_offers failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "22222222222");
}

// ---------------------------------------------------------------------------
// Section 3: Scan run lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn scan_run_lifecycle_running_to_succeeded(pool: sqlx::PgPool) {
    let run = start_scan_run(&pool, "scheduler")
        .await
        .expect("start_scan_run failed");
    assert_eq!(run.status, "running");
    assert!(run.completed_at.is_none());

    let totals = ScanRunTotals {
        queries_total: 2,
        queries_failed: 0,
        candidates_seen: 7,
        offers_new: 3,
        notifications_sent: 3,
    };
    complete_scan_run(&pool, run.id, totals)
        .await
        .expect("complete_scan_run failed");

    let rows = list_scan_runs(&pool, Some(10))
        .await
        .expect("list_scan_runs failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "succeeded");
    assert_eq!(rows[0].offers_new, 3);
    assert!(rows[0].completed_at.is_some());
}

#[sqlx::test(migrations = "../../migrations")]
async fn scan_run_failure_records_error_message(pool: sqlx::PgPool) {
    let run = start_scan_run(&pool, "cli")
        .await
        .expect("start_scan_run failed");

    fail_scan_run(&pool, run.id, "all queries failed")
        .await
        .expect("fail_scan_run failed");

    let rows = list_scan_runs(&pool, None).await.expect("list_scan_runs failed");
    assert_eq!(rows[0].status, "failed");
    assert_eq!(rows[0].error_message.as_deref(), Some("all queries failed"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn completing_a_finished_run_is_rejected(pool: sqlx::PgPool) {
    let run = start_scan_run(&pool, "scheduler")
        .await
        .expect("start_scan_run failed");
    complete_scan_run(&pool, run.id, ScanRunTotals::default())
        .await
        .expect("first completion failed");

    let err = complete_scan_run(&pool, run.id, ScanRunTotals::default())
        .await
        .expect_err("second completion must fail");
    assert!(err.to_string().contains("not in status"));
}
