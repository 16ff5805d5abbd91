//! Quote provider interface consumed by the scan dispatcher.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::quote::{IndexSnapshot, RawQuote};

/// Source of live quote snapshots.
///
/// Both calls are single-attempt: implementations must not retry. Timeouts
/// are imposed by the caller, so an implementation may simply await.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<RawQuote, FetchError>;

    async fn fetch_index_change(&self, index: &str) -> Result<IndexSnapshot, FetchError>;
}
