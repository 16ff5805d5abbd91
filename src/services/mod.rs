//! External collaborators: quote providers.

pub mod market_data;
pub mod nse;

pub use market_data::QuoteProvider;
pub use nse::NseQuoteProvider;
