//! Unit tests for configuration loading.

use super::*;
use std::collections::HashMap;

fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn full_env() -> HashMap<String, String> {
    env(&[
        ("SELLER_TOKEN", "seller-secret"),
        ("CLIENT_ID", "12345"),
        ("MARKET_TOKEN", "market-secret"),
        ("FBS_ID", "1001"),
        ("DBS_ID", "1002"),
        ("WAREHOUSE_FBS_ID", "501"),
        ("WAREHOUSE_DBS_ID", "502"),
    ])
}

fn load(platform: Platform, vars: &HashMap<String, String>) -> Result<Config> {
    Config::from_lookup(platform, |name| vars.get(name).cloned())
}

#[test]
fn loads_all_platforms_with_defaults() {
    let config = load(Platform::All, &full_env()).unwrap();

    assert_eq!(config.feed.url, DEFAULT_FEED_URL);
    assert_eq!(config.feed.archive_member, "ostatki.xls");

    let seller = config.seller.unwrap();
    assert_eq!(seller.client_id, "12345");
    assert_eq!(seller.token, "seller-secret");
    assert_eq!(seller.api_url, DEFAULT_SELLER_API_URL);
    assert_eq!(seller.limits, SELLER_LIMITS);

    let market = config.market.unwrap();
    assert_eq!(market.token, "market-secret");
    assert_eq!(market.limits, MARKET_LIMITS);
    assert_eq!(
        market.channels,
        vec![
            MarketChannel {
                label: "FBS",
                campaign_id: "1001".to_string(),
                warehouse_id: 501,
            },
            MarketChannel {
                label: "DBS",
                campaign_id: "1002".to_string(),
                warehouse_id: 502,
            },
        ]
    );
}

#[test]
fn seller_only_ignores_market_variables() {
    let vars = env(&[("SELLER_TOKEN", "s"), ("CLIENT_ID", "c")]);
    let config = load(Platform::Seller, &vars).unwrap();
    assert!(config.seller.is_some());
    assert!(config.market.is_none());
}

#[test]
fn market_only_ignores_seller_variables() {
    let mut vars = full_env();
    vars.remove("SELLER_TOKEN");
    vars.remove("CLIENT_ID");
    let config = load(Platform::Market, &vars).unwrap();
    assert!(config.seller.is_none());
    assert_eq!(config.market.unwrap().channels.len(), 2);
}

#[test]
fn missing_secret_is_reported_by_name() {
    let mut vars = full_env();
    vars.remove("MARKET_TOKEN");
    match load(Platform::All, &vars) {
        Err(SyncError::ConfigurationMissing(name)) => assert_eq!(name, "MARKET_TOKEN"),
        other => panic!("expected missing configuration, got {other:?}"),
    }
}

#[test]
fn blank_value_counts_as_missing() {
    let mut vars = full_env();
    vars.insert("CLIENT_ID".to_string(), "   ".to_string());
    assert!(matches!(
        load(Platform::Seller, &vars),
        Err(SyncError::ConfigurationMissing(name)) if name == "CLIENT_ID"
    ));
}

#[test]
fn non_numeric_warehouse_is_invalid() {
    let mut vars = full_env();
    vars.insert("WAREHOUSE_DBS_ID".to_string(), "main".to_string());
    assert!(matches!(
        load(Platform::Market, &vars),
        Err(SyncError::ConfigurationInvalid { name, .. }) if name == "WAREHOUSE_DBS_ID"
    ));
}

#[test]
fn batch_limits_can_be_overridden() {
    let mut vars = full_env();
    vars.insert("SELLER_PRICE_BATCH".to_string(), "1000".to_string());
    vars.insert("MARKET_STOCK_BATCH".to_string(), "250".to_string());
    let config = load(Platform::All, &vars).unwrap();
    assert_eq!(config.seller.unwrap().limits.prices, 1000);
    assert_eq!(config.market.unwrap().limits.stocks, 250);
}

#[test]
fn zero_batch_size_is_invalid() {
    let mut vars = full_env();
    vars.insert("SELLER_STOCK_BATCH".to_string(), "0".to_string());
    assert!(matches!(
        load(Platform::Seller, &vars),
        Err(SyncError::ConfigurationInvalid { .. })
    ));
}

#[test]
fn feed_location_can_be_overridden() {
    let mut vars = full_env();
    vars.insert("FEED_URL".to_string(), "http://localhost/stock.zip".to_string());
    vars.insert("FEED_ARCHIVE_MEMBER".to_string(), "stock.csv".to_string());
    let config = load(Platform::Seller, &vars).unwrap();
    assert_eq!(config.feed.url, "http://localhost/stock.zip");
    assert_eq!(config.feed.archive_member, "stock.csv");
}

#[test]
fn platform_selection() {
    assert!(Platform::All.includes_seller() && Platform::All.includes_market());
    assert!(Platform::Seller.includes_seller() && !Platform::Seller.includes_market());
    assert!(!Platform::Market.includes_seller() && Platform::Market.includes_market());
}
