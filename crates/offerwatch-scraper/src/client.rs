//! HTTP client for marketplace search pages.

use std::time::Duration;

use offerwatch_core::SearchQuery;
use reqwest::Client;

use crate::error::ScraperError;
use crate::retry::retry_with_backoff;

/// Fetches rendered search pages from the marketplace.
///
/// Sends browser-like headers and treats the response body as opaque markup
/// for the extraction strategies. Transient failures (429, network errors)
/// are retried with exponential backoff up to `max_retries` additional
/// attempts; other non-2xx statuses surface as typed errors for the caller
/// to log and skip.
pub struct PageClient {
    client: Client,
    max_retries: u32,
    backoff_base_secs: u64,
}

impl PageClient {
    /// Creates a `PageClient` with the configured navigation timeout,
    /// `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Fetches one search-results page for `query` and returns its markup.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidSearchUrl`] — `origin` is not a valid URL base.
    /// - [`ScraperError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ScraperError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ScraperError::Http`] — network failure after all retries exhausted.
    pub async fn fetch_search_page(
        &self,
        origin: &str,
        query: &SearchQuery,
    ) -> Result<String, ScraperError> {
        let url = Self::search_url(origin, query)?;

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "es-CL,es;q=0.9,en;q=0.8")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);

                    return Err(ScraperError::RateLimited {
                        domain: extract_domain(&url),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }

    /// Builds the search URL for the given origin and query.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSearchUrl`] if `origin` cannot be
    /// parsed as a URL base.
    fn search_url(origin: &str, query: &SearchQuery) -> Result<String, ScraperError> {
        let base = format!(
            "{}/marketplace/category/search",
            origin.trim_end_matches('/')
        );
        let mut url =
            reqwest::Url::parse(&base).map_err(|e| ScraperError::InvalidSearchUrl {
                origin: origin.to_owned(),
                reason: e.to_string(),
            })?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", &query.query);
            if let Some(min) = query.min_price {
                pairs.append_pair("minPrice", &min.to_string());
            }
            if let Some(max) = query.max_price {
                pairs.append_pair("maxPrice", &max.to_string());
            }
            pairs.append_pair("exact", "false");
        }

        Ok(url.to_string())
    }
}

fn extract_domain(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| url.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str, min: Option<i64>, max: Option<i64>) -> SearchQuery {
        SearchQuery {
            query: text.to_string(),
            min_price: min,
            max_price: max,
        }
    }

    #[test]
    fn search_url_includes_query_and_bounds() {
        let url = PageClient::search_url(
            "https://www.facebook.com",
            &query("bicicleta", Some(30_000), Some(200_000)),
        )
        .expect("url");
        assert_eq!(
            url,
            "https://www.facebook.com/marketplace/category/search?query=bicicleta&minPrice=30000&maxPrice=200000&exact=false"
        );
    }

    #[test]
    fn search_url_omits_absent_bounds() {
        let url =
            PageClient::search_url("https://www.facebook.com/", &query("guitarra", None, None))
                .expect("url");
        assert_eq!(
            url,
            "https://www.facebook.com/marketplace/category/search?query=guitarra&exact=false"
        );
    }

    #[test]
    fn search_url_percent_encodes_query_text() {
        let url = PageClient::search_url(
            "https://www.facebook.com",
            &query("mountain bike", None, None),
        )
        .expect("url");
        assert!(url.contains("query=mountain+bike"), "got: {url}");
    }

    #[test]
    fn search_url_rejects_invalid_origin() {
        let result = PageClient::search_url("not a url", &query("bicicleta", None, None));
        assert!(matches!(
            result,
            Err(ScraperError::InvalidSearchUrl { .. })
        ));
    }

    #[test]
    fn extract_domain_pulls_host() {
        assert_eq!(
            extract_domain("https://www.facebook.com/marketplace/category/search?query=x"),
            "www.facebook.com"
        );
    }
}
