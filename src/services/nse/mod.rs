//! Exchange quote adapter.

pub mod client;
pub mod messages;

pub use client::NseQuoteProvider;
