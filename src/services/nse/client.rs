//! HTTP quote provider backed by the exchange's public JSON endpoints.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

use super::messages::{merge_sections, QuoteEquityResponse, QuoteIndexResponse};
use crate::error::FetchError;
use crate::models::quote::{IndexSnapshot, RawQuote};
use crate::services::market_data::QuoteProvider;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Order book and trade info only arrive in this section of the quote API.
const TRADE_INFO_SECTION: &str = "trade_info";

pub struct NseQuoteProvider {
    base_url: String,
    http: reqwest::Client,
    primed: OnceCell<()>,
}

impl NseQuoteProvider {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let base_url = base_url.into();
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-IN,en;q=0.9"));
        if let Ok(referer) = HeaderValue::from_str(&base_url) {
            headers.insert(REFERER, referer);
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(crate::config::get_nse_base_url())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
            primed: OnceCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.base_url)
            .and_then(|base| base.join(path))
            .map_err(|e| FetchError::network(format!("invalid endpoint {}: {}", path, e)))?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// Load the public quote page once so the API sees the session cookies it sets.
    async fn prime_session(&self, symbol: &str) {
        let url = match self.endpoint("/get-quotes/equity", &[("symbol", symbol)]) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build quote page url");
                return;
            }
        };
        match self.http.get(url).send().await {
            Ok(response) => debug!(status = %response.status(), "quote page loaded"),
            Err(e) => warn!(error = %e, "quote page load failed; continuing without cookies"),
        }
    }

    async fn get_value(&self, url: Url) -> Result<Value, FetchError> {
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::network(format!("HTTP {} from {}", status, url)));
        }

        let body = response.text().await.map_err(map_transport_error)?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::parse(format!("malformed payload from {}: {}", url, e)))
    }
}

fn map_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::timeout(e.to_string())
    } else if e.is_decode() {
        FetchError::parse(e.to_string())
    } else {
        FetchError::network(e.to_string())
    }
}

#[async_trait]
impl QuoteProvider for NseQuoteProvider {
    /// Base quote plus the trade-info section, merged before decoding.
    ///
    /// A failed section request leaves the order book and trade fields
    /// unavailable; only a failed base request fails the fetch.
    async fn fetch_quote(&self, symbol: &str) -> Result<RawQuote, FetchError> {
        self.primed
            .get_or_init(|| self.prime_session(symbol))
            .await;

        let base_url = self.endpoint("/api/quote-equity", &[("symbol", symbol)])?;
        let section_url = self.endpoint(
            "/api/quote-equity",
            &[("symbol", symbol), ("section", TRADE_INFO_SECTION)],
        )?;
        debug!(symbol = %symbol, url = %base_url, "fetching quote");

        let (base, section) = tokio::join!(self.get_value(base_url), self.get_value(section_url));
        let mut payload = base?;
        match section {
            Ok(section) => merge_sections(&mut payload, section),
            Err(e) => warn!(
                symbol = %symbol,
                error = %e,
                "trade info section unavailable; order book signals will be skipped"
            ),
        }

        let response: QuoteEquityResponse = serde_json::from_value(payload)
            .map_err(|e| FetchError::parse(format!("malformed quote for {}: {}", symbol, e)))?;
        response.into_raw_quote(symbol)
    }

    async fn fetch_index_change(&self, index: &str) -> Result<IndexSnapshot, FetchError> {
        let url = self.endpoint("/api/quote-index", &[("index", index)])?;
        debug!(index = %index, url = %url, "fetching index");
        let response: QuoteIndexResponse = self.get_json(url).await?;
        response.into_snapshot(index)
    }
}
