//! Tests for the Market platform client.

use chrono::{TimeZone, Utc};
use reqwest::Client;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::error::SyncError;
use crate::marketplace::{MarketClient, MarketplaceClient, NextPage};
use crate::models::{Currency, PriceUpdate, StockUpdate};

fn client_with_mock(mock_uri: &str) -> MarketClient {
    MarketClient::new(Client::new(), "market_token".to_string(), "1001".to_string())
        .with_base_url(mock_uri)
}

#[test]
fn creates_client_for_campaign() {
    let client = MarketClient::new(Client::new(), "t".to_string(), "2002".to_string());
    assert_eq!(client.base_url, "https://api.partner.market.yandex.ru");
    assert_eq!(client.campaign_id, "2002");
    assert_eq!(client.token, "t");
    assert_eq!(client.name(), "market/2002");
}

#[tokio::test]
async fn lists_catalog_page_with_bearer_token() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/campaigns/1001/offer-mapping-entries"))
        .and(query_param("page_token", "abc"))
        .and(query_param("limit", "200"))
        .and(header("Authorization", "Bearer market_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "paging": { "nextPageToken": "def" },
                "offerMappingEntries": [
                    { "offer": { "shopSku": "111", "name": "AE-1200" } },
                    { "offer": { "shopSku": "222" } }
                ]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let page = client.list_catalog_page("abc").await.unwrap();
    assert_eq!(page.offer_ids, vec!["111", "222"]);
    assert_eq!(page.next, NextPage::Cursor("def".to_string()));
}

#[tokio::test]
async fn last_page_has_empty_cursor() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/campaigns/1001/offer-mapping-entries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": {
                "paging": {},
                "offerMappingEntries": [ { "offer": { "shopSku": "333" } } ]
            }
        })))
        .mount(&mock_server)
        .await;

    let page = client.list_catalog_page("").await.unwrap();
    assert_eq!(page.offer_ids, vec!["333"]);
    assert_eq!(page.next, NextPage::Cursor(String::new()));
}

#[tokio::test]
async fn pushes_stocks_with_warehouse_and_timestamp() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("PUT"))
        .and(path("/campaigns/1001/offers/stocks"))
        .and(header("Authorization", "Bearer market_token"))
        .and(body_json(serde_json::json!({
            "skus": [{
                "sku": "111",
                "warehouseId": 555,
                "items": [{
                    "count": 100,
                    "type": "FIT",
                    "updatedAt": "2024-03-01T12:00:00Z"
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "OK" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let batch = vec![StockUpdate {
        offer_id: "111".to_string(),
        warehouse_id: Some(555),
        count: 100,
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
    }];
    client.push_stock_updates(&batch).await.unwrap();
}

#[tokio::test]
async fn pushes_prices_as_numbers() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .and(path("/campaigns/1001/offer-prices/updates"))
        .and(body_json(serde_json::json!({
            "offers": [{
                "id": "111",
                "price": { "value": 5990, "currencyId": "RUR" }
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "OK" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let batch = vec![PriceUpdate {
        offer_id: "111".to_string(),
        price: "5990".to_string(),
        currency: Currency::Rub,
    }];
    client.push_price_updates(&batch).await.unwrap();
}

#[tokio::test]
async fn unparseable_price_fails_before_sending() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let batch = vec![PriceUpdate {
        offer_id: "111".to_string(),
        price: "99999999999999999999999".to_string(),
        currency: Currency::Rub,
    }];
    assert!(matches!(
        client.push_price_updates(&batch).await,
        Err(SyncError::MalformedPrice(_))
    ));
}

#[tokio::test]
async fn server_error_is_an_http_error() {
    let mock_server = MockServer::start().await;
    let client = client_with_mock(&mock_server.uri());

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&mock_server)
        .await;

    match client.push_stock_updates(&[]).await {
        Err(SyncError::Http { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "internal");
        }
        other => panic!("expected HTTP error, got {other:?}"),
    }
}
