//! `queries` — validate and print the configured search queries.

pub(super) fn run() -> anyhow::Result<()> {
    let config = offerwatch_core::load_app_config()?;
    let queries_file = offerwatch_core::load_queries(&config.queries_path)?;

    println!("queries ({}):", queries_file.queries.len());
    for q in &queries_file.queries {
        let band = match (q.min_price, q.max_price) {
            (Some(min), Some(max)) => format!("{min}..={max}"),
            (Some(min), None) => format!("{min}.."),
            (None, Some(max)) => format!("..={max}"),
            (None, None) => "unbounded".to_string(),
        };
        println!("  {:<30}  {band}", q.query);
    }

    println!(
        "negative keywords: {}",
        queries_file.negative_keywords.join(", ")
    );

    Ok(())
}
