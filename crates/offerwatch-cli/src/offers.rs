//! `offers` — print recently detected offers.

use offerwatch_db::OfferFilter;

pub(super) async fn run(
    title: Option<String>,
    min_price: Option<i64>,
    max_price: Option<i64>,
    limit: i64,
) -> anyhow::Result<()> {
    let config = offerwatch_core::load_app_config()?;
    let pool_config = offerwatch_db::PoolConfig::from_app_config(&config);
    let pool = offerwatch_db::connect_pool(&config.database_url, pool_config).await?;

    let filter = OfferFilter {
        title_contains: title,
        min_price,
        max_price,
        limit: Some(limit),
    };
    let rows = offerwatch_db::list_offers(&pool, &filter).await?;

    if rows.is_empty() {
        println!("no offers recorded yet");
        return Ok(());
    }

    for row in rows {
        println!(
            "{}  {:<12}  {:>12}  [{}]  {}",
            row.first_seen_at.format("%Y-%m-%d %H:%M"),
            row.id,
            row.price_text,
            row.confidence,
            row.title
        );
    }

    Ok(())
}
