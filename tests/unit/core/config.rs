//! Unit tests for scan configuration

use std::time::Duration;

use intrascan::config::{parse_views, OutputTargets, ScanConfig};
use intrascan::error::ScanError;
use intrascan::models::View;

#[test]
fn defaults_are_valid() {
    let config = ScanConfig::default();
    assert_eq!(config.concurrency_limit, 3);
    assert_eq!(config.per_symbol_timeout, Duration::from_secs(8));
    assert_eq!(config.index_timeout, Duration::from_secs(10));
    assert_eq!(config.top_n, 5);
    assert_eq!(config.view_filter, View::ALL.to_vec());
    assert_eq!(config.output_targets, OutputTargets::Both);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_values_are_rejected() {
    let cases = [
        ScanConfig::default().with_concurrency(0),
        ScanConfig::default().with_timeout(Duration::ZERO),
        ScanConfig::default().with_index_timeout(Duration::ZERO),
        ScanConfig::default().with_top_n(0),
        ScanConfig::default().with_views(Vec::new()),
    ];
    for config in cases {
        assert!(
            matches!(config.validate(), Err(ScanError::Config(_))),
            "{:?} should be rejected",
            config
        );
    }
}

#[test]
fn view_lists_parse_case_insensitively_without_duplicates() {
    let views = parse_views("buy, Watch,BUY").unwrap();
    assert_eq!(views, vec![View::Buy, View::Watch]);
    assert!(parse_views("BUY,SELL").is_err());
}

#[test]
fn output_targets_parse() {
    assert_eq!("json".parse::<OutputTargets>().unwrap(), OutputTargets::Structured);
    assert_eq!("Digest".parse::<OutputTargets>().unwrap(), OutputTargets::Digest);
    assert!(OutputTargets::Both.structured() && OutputTargets::Both.digest());
    assert!(!OutputTargets::Digest.structured());
    assert!("xml".parse::<OutputTargets>().is_err());
}
