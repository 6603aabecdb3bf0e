//! Seller platform API client.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CatalogPage, MarketplaceClient, NextPage};
use crate::error::Result;
use crate::http::ensure_success;
use crate::models::{PriceUpdate, StockUpdate};

/// Production Seller API root
pub const DEFAULT_SELLER_API_URL: &str = "https://api-seller.ozon.ru";
/// Offers requested per catalog page
pub const SELLER_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Serialize)]
struct ProductListRequest<'a> {
    filter: ProductFilter,
    last_id: &'a str,
    limit: u32,
}

#[derive(Debug, Serialize)]
struct ProductFilter {
    visibility: &'static str,
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    result: ProductListResult,
}

#[derive(Debug, Deserialize)]
struct ProductListResult {
    #[serde(default)]
    items: Vec<ProductItem>,
    total: usize,
    #[serde(default)]
    last_id: String,
}

#[derive(Debug, Deserialize)]
struct ProductItem {
    offer_id: String,
}

#[derive(Debug, Serialize)]
struct StocksRequest<'a> {
    stocks: Vec<SellerStock<'a>>,
}

#[derive(Debug, Serialize)]
struct SellerStock<'a> {
    offer_id: &'a str,
    stock: u32,
}

#[derive(Debug, Serialize)]
struct PricesRequest<'a> {
    prices: Vec<SellerPrice<'a>>,
}

#[derive(Debug, Serialize)]
struct SellerPrice<'a> {
    auto_action_enabled: &'static str,
    currency_code: &'static str,
    offer_id: &'a str,
    old_price: &'static str,
    price: &'a str,
}

impl<'a> From<&'a PriceUpdate> for SellerPrice<'a> {
    fn from(update: &'a PriceUpdate) -> Self {
        Self {
            auto_action_enabled: "UNKNOWN",
            currency_code: update.currency.iso_code(),
            offer_id: &update.offer_id,
            old_price: "0",
            price: &update.price,
        }
    }
}

/// Client for one Seller platform account.
pub struct SellerClient {
    pub(crate) client: Client,
    pub(crate) client_id: String,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
}

impl SellerClient {
    pub fn new(client: Client, client_id: String, api_key: String) -> Self {
        info!("Creating Seller API client for client id {client_id}");
        debug!("API key length: {}", api_key.len());
        Self {
            client,
            client_id,
            api_key,
            base_url: DEFAULT_SELLER_API_URL.to_string(),
        }
    }

    /// Points the client at another API root (staging or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.base_url);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .header("Client-Id", &self.client_id)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await?;
        ensure_success(response).await
    }
}

#[async_trait]
impl MarketplaceClient for SellerClient {
    fn name(&self) -> &str {
        "seller"
    }

    async fn list_catalog_page(&self, cursor: &str) -> Result<CatalogPage> {
        let request = ProductListRequest {
            filter: ProductFilter { visibility: "ALL" },
            last_id: cursor,
            limit: SELLER_PAGE_SIZE,
        };
        let response = self.post("/v2/product/list", &request).await?;
        let text = response.text().await?;
        let list: ProductListResponse = serde_json::from_str(&text)?;

        debug!(
            "Seller catalog page: {} items of {} total",
            list.result.items.len(),
            list.result.total
        );

        Ok(CatalogPage {
            offer_ids: list.result.items.into_iter().map(|i| i.offer_id).collect(),
            next: NextPage::Total {
                total: list.result.total,
                cursor: list.result.last_id,
            },
        })
    }

    async fn push_stock_updates(&self, batch: &[StockUpdate]) -> Result<()> {
        let request = StocksRequest {
            stocks: batch
                .iter()
                .map(|s| SellerStock {
                    offer_id: &s.offer_id,
                    stock: s.count,
                })
                .collect(),
        };
        self.post("/v1/product/import/stocks", &request).await?;
        info!("Seller accepted {} stock updates", batch.len());
        Ok(())
    }

    async fn push_price_updates(&self, batch: &[PriceUpdate]) -> Result<()> {
        let request = PricesRequest {
            prices: batch.iter().map(SellerPrice::from).collect(),
        };
        self.post("/v1/product/import/prices", &request).await?;
        info!("Seller accepted {} price updates", batch.len());
        Ok(())
    }
}
