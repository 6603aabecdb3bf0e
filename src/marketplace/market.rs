//! Market platform API client, scoped to one campaign.

use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use super::{CatalogPage, MarketplaceClient, NextPage};
use crate::error::{Result, SyncError};
use crate::http::ensure_success;
use crate::models::{PriceUpdate, StockUpdate};

/// Production Market partner API root
pub const DEFAULT_MARKET_API_URL: &str = "https://api.partner.market.yandex.ru";
/// Offers requested per catalog page
pub const MARKET_PAGE_SIZE: u32 = 200;

#[derive(Debug, Deserialize)]
struct MappingEntriesResponse {
    result: MappingEntriesResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MappingEntriesResult {
    #[serde(default)]
    offer_mapping_entries: Vec<MappingEntry>,
    #[serde(default)]
    paging: Paging,
}

#[derive(Debug, Deserialize)]
struct MappingEntry {
    offer: MappedOffer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MappedOffer {
    shop_sku: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Paging {
    next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct StocksRequest<'a> {
    skus: Vec<SkuStock<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SkuStock<'a> {
    sku: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    warehouse_id: Option<u64>,
    items: [StockItem; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StockItem {
    count: u32,
    #[serde(rename = "type")]
    kind: &'static str,
    updated_at: String,
}

impl<'a> From<&'a StockUpdate> for SkuStock<'a> {
    fn from(update: &'a StockUpdate) -> Self {
        Self {
            sku: &update.offer_id,
            warehouse_id: update.warehouse_id,
            items: [StockItem {
                count: update.count,
                kind: "FIT",
                updated_at: update.updated_at(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct PricesRequest<'a> {
    offers: Vec<OfferPrice<'a>>,
}

#[derive(Debug, Serialize)]
struct OfferPrice<'a> {
    id: &'a str,
    price: PriceValue,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PriceValue {
    value: u64,
    currency_id: &'static str,
}

impl<'a> TryFrom<&'a PriceUpdate> for OfferPrice<'a> {
    type Error = SyncError;

    fn try_from(update: &'a PriceUpdate) -> Result<Self> {
        let value = update
            .price
            .parse::<u64>()
            .map_err(|_| SyncError::MalformedPrice(update.price.clone()))?;
        Ok(Self {
            id: &update.offer_id,
            price: PriceValue {
                value,
                currency_id: update.currency.market_code(),
            },
        })
    }
}

/// Client for one Market campaign (fulfillment channel).
pub struct MarketClient {
    pub(crate) client: Client,
    pub(crate) token: String,
    pub(crate) campaign_id: String,
    pub(crate) base_url: String,
    label: String,
}

impl MarketClient {
    pub fn new(client: Client, token: String, campaign_id: String) -> Self {
        info!("Creating Market API client for campaign {campaign_id}");
        debug!("API token length: {}", token.len());
        let label = format!("market/{campaign_id}");
        Self {
            client,
            token,
            campaign_id,
            base_url: DEFAULT_MARKET_API_URL.to_string(),
            label,
        }
    }

    /// Points the client at another API root (staging or a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn campaign_url(&self, path: &str) -> String {
        format!("{}/campaigns/{}/{path}", self.base_url, self.campaign_id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
    }
}

#[async_trait]
impl MarketplaceClient for MarketClient {
    fn name(&self) -> &str {
        &self.label
    }

    async fn list_catalog_page(&self, cursor: &str) -> Result<CatalogPage> {
        let url = self.campaign_url("offer-mapping-entries");
        debug!("GET {url} (page_token: '{cursor}')");

        let limit = MARKET_PAGE_SIZE.to_string();
        let response = self
            .authorized(self.client.get(&url))
            .query(&[("page_token", cursor), ("limit", limit.as_str())])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let text = response.text().await?;
        let entries: MappingEntriesResponse = serde_json::from_str(&text)?;

        let result = entries.result;
        debug!(
            "Market catalog page: {} entries",
            result.offer_mapping_entries.len()
        );

        Ok(CatalogPage {
            offer_ids: result
                .offer_mapping_entries
                .into_iter()
                .map(|e| e.offer.shop_sku)
                .collect(),
            next: NextPage::Cursor(result.paging.next_page_token.unwrap_or_default()),
        })
    }

    async fn push_stock_updates(&self, batch: &[StockUpdate]) -> Result<()> {
        let url = self.campaign_url("offers/stocks");
        debug!("PUT {url}");
        let request = StocksRequest {
            skus: batch.iter().map(SkuStock::from).collect(),
        };
        let response = self
            .authorized(self.client.put(&url))
            .json(&request)
            .send()
            .await?;
        ensure_success(response).await?;
        info!("{} accepted {} stock updates", self.label, batch.len());
        Ok(())
    }

    async fn push_price_updates(&self, batch: &[PriceUpdate]) -> Result<()> {
        let url = self.campaign_url("offer-prices/updates");
        debug!("POST {url}");
        let request = PricesRequest {
            offers: batch
                .iter()
                .map(OfferPrice::try_from)
                .collect::<Result<Vec<_>>>()?,
        };
        let response = self
            .authorized(self.client.post(&url))
            .json(&request)
            .send()
            .await?;
        ensure_success(response).await?;
        info!("{} accepted {} price updates", self.label, batch.len());
        Ok(())
    }
}
