//! Integration tests for the NSE quote provider against a mocked exchange

use intrascan::error::FetchErrorKind;
use intrascan::services::market_data::QuoteProvider;
use intrascan::services::NseQuoteProvider;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Matches the base quote request but not the sectioned one.
fn without_section(req: &wiremock::Request) -> bool {
    !req.url.query_pairs().any(|(key, _)| key == "section")
}

fn provider(server: &MockServer) -> NseQuoteProvider {
    NseQuoteProvider::with_client(server.uri(), reqwest::Client::new())
}

fn equity_payload() -> serde_json::Value {
    json!({
        "info": { "symbol": "INFY", "isFNOSec": true },
        "metadata": { "status": "Listed" },
        "securityInfo": { "tradingStatus": "Active", "surveillance": { "surv": "-", "desc": null } },
        "priceInfo": {
            "lastPrice": "1,506.40",
            "pChange": 1.85,
            "vwap": 1498.2,
            "upperCP": "1,651.60",
            "lowerCP": "1,351.30",
            "intraDayHighLow": { "min": 1480.0, "max": 1509.9 },
            "weekHighLow": { "min": 1215.45, "max": "1,733.00" }
        },
        "tradeInfo": { "applicableMarginRate": "12.5", "deliveryToTradedQuantity": 48.2 },
        "marketDeptOrderBook": {
            "totalBuyQuantity": 182300,
            "totalSellQuantity": "95,100",
            "bid": [{ "price": 1506.3, "quantity": 120 }],
            "ask": [{ "price": 1506.6, "quantity": 80 }]
        }
    })
}

#[tokio::test]
async fn equity_quote_is_decoded_from_display_formatted_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .and(query_param("symbol", "INFY"))
        .and(without_section)
        .respond_with(ResponseTemplate::new(200).set_body_json(equity_payload()))
        .expect(1)
        .mount(&server)
        .await;

    let quote = provider(&server).fetch_quote("INFY").await.expect("quote");

    assert_eq!(quote.symbol, "INFY");
    assert_eq!(quote.ltp, Some(1506.4));
    assert_eq!(quote.change_pct, Some(1.85));
    assert_eq!(quote.upper_band, Some(1651.6));
    assert_eq!(quote.week52_high, Some(1733.0));
    assert_eq!(quote.day_high, Some(1509.9));
    assert_eq!(quote.total_sell_qty, Some(95_100.0));
    assert_eq!(quote.margin_rate, Some(12.5));
    assert_eq!(quote.trading_status.as_deref(), Some("Active"));
    assert_eq!(quote.surveillance, None);
    assert_eq!(quote.is_fno, Some(true));
    assert_eq!(quote.median_volume_20d, None);
    assert_eq!(quote.fno_ban, None);
    let spread = quote.spread_pct.expect("spread from top of book");
    assert!((spread - 0.3 / 1506.4 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn order_book_and_trade_info_come_from_the_trade_info_section() {
    let server = MockServer::start().await;
    let mut base = equity_payload();
    let base_map = base.as_object_mut().expect("object payload");
    let order_book = base_map.remove("marketDeptOrderBook").expect("order book");
    let trade_info = base_map.remove("tradeInfo").expect("trade info");

    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .and(query_param("symbol", "INFY"))
        .and(without_section)
        .respond_with(ResponseTemplate::new(200).set_body_json(base))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .and(query_param("symbol", "INFY"))
        .and(query_param("section", "trade_info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "marketDeptOrderBook": order_book,
            "tradeInfo": trade_info
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quote = provider(&server).fetch_quote("INFY").await.expect("quote");

    assert_eq!(quote.ltp, Some(1506.4));
    assert_eq!(quote.total_buy_qty, Some(182_300.0));
    assert_eq!(quote.total_sell_qty, Some(95_100.0));
    assert_eq!(quote.margin_rate, Some(12.5));
    assert!(quote.spread_pct.is_some());
}

#[tokio::test]
async fn failed_trade_info_section_leaves_book_fields_empty() {
    let server = MockServer::start().await;
    let mut base = equity_payload();
    let base_map = base.as_object_mut().expect("object payload");
    base_map.remove("marketDeptOrderBook");
    base_map.remove("tradeInfo");

    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .and(without_section)
        .respond_with(ResponseTemplate::new(200).set_body_json(base))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .and(query_param("section", "trade_info"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let quote = provider(&server).fetch_quote("INFY").await.expect("quote");

    assert_eq!(quote.ltp, Some(1506.4));
    assert_eq!(quote.total_buy_qty, None);
    assert_eq!(quote.margin_rate, None);
    assert_eq!(quote.spread_pct, None);
}

#[tokio::test]
async fn index_change_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quote-index"))
        .and(query_param("index", "NIFTY 50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "info": { "index": "NIFTY 50" },
            "priceInfo": { "last": "22,514.65", "pChange": "0.42" }
        })))
        .mount(&server)
        .await;

    let snapshot = provider(&server)
        .fetch_index_change("NIFTY 50")
        .await
        .expect("index snapshot");

    assert_eq!(snapshot.name, "NIFTY 50");
    assert_eq!(snapshot.change_pct, 0.42);
    assert_eq!(snapshot.last, Some(22_514.65));
}

#[tokio::test]
async fn server_error_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_quote("INFY").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Network);
}

#[tokio::test]
async fn html_body_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Access Denied</html>"))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_quote("INFY").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Parse);
}

#[tokio::test]
async fn payload_without_prices_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/quote-equity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "info": { "symbol": "INFY" } })))
        .mount(&server)
        .await;

    let err = provider(&server).fetch_quote("INFY").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Parse);
}

#[tokio::test]
async fn unreachable_host_is_a_network_failure() {
    let provider = NseQuoteProvider::with_client("http://127.0.0.1:9", reqwest::Client::new());
    let err = provider.fetch_quote("INFY").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Network);
}
