use offerwatch_core::{AppConfig, QueriesFile, SearchQuery, ZeroPricePolicy};

/// Everything one scan cycle needs besides its collaborators: the ordered
/// query list and the extraction/filter settings. Built once at startup —
/// there is no ambient configuration state.
#[derive(Debug, Clone)]
pub struct WatchContext {
    pub market_origin: String,
    pub queries: Vec<SearchQuery>,
    pub negative_keywords: Vec<String>,
    pub result_cap: usize,
    pub settle_delay_ms: u64,
    pub zero_price_policy: ZeroPricePolicy,
}

impl WatchContext {
    #[must_use]
    pub fn from_config(config: &AppConfig, queries_file: QueriesFile) -> Self {
        Self {
            market_origin: config.market_origin.clone(),
            queries: queries_file.queries,
            negative_keywords: queries_file.negative_keywords,
            result_cap: config.result_cap,
            settle_delay_ms: config.settle_delay_ms,
            zero_price_policy: config.zero_price_policy,
        }
    }
}

/// Outcome counters for one completed cycle. Mirrors what gets persisted to
/// `scan_runs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub queries_total: usize,
    pub queries_failed: usize,
    pub candidates_seen: usize,
    pub offers_accepted: usize,
    pub offers_new: usize,
    pub notifications_sent: usize,
}
