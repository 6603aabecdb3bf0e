//! Process configuration loaded from the environment.
//!
//! Secrets and identifiers come from environment variables (a `.env` file is
//! loaded by the binary first). Only the variables of the selected
//! platforms are required; anything missing is reported before the first
//! request is made.

use clap::ValueEnum;
use log::debug;

use crate::error::{Result, SyncError};
use crate::feed::{DEFAULT_ARCHIVE_MEMBER, DEFAULT_FEED_URL};
use crate::marketplace::{DEFAULT_MARKET_API_URL, DEFAULT_SELLER_API_URL};
use crate::sync::BatchLimits;

/// Default Seller batch caps: stocks, prices
pub const SELLER_LIMITS: BatchLimits = BatchLimits {
    stocks: 100,
    prices: 900,
};
/// Default Market batch caps: stocks, prices
pub const MARKET_LIMITS: BatchLimits = BatchLimits {
    stocks: 2000,
    prices: 500,
};

/// Which marketplaces a run synchronizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Platform {
    All,
    Seller,
    Market,
}

impl Platform {
    pub fn includes_seller(self) -> bool {
        matches!(self, Platform::All | Platform::Seller)
    }

    pub fn includes_market(self) -> bool {
        matches!(self, Platform::All | Platform::Market)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub url: String,
    pub archive_member: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerConfig {
    pub client_id: String,
    pub token: String,
    pub api_url: String,
    pub limits: BatchLimits,
}

/// One Market fulfillment channel: its own campaign and warehouse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketChannel {
    pub label: &'static str,
    pub campaign_id: String,
    pub warehouse_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    pub token: String,
    pub api_url: String,
    pub channels: Vec<MarketChannel>,
    pub limits: BatchLimits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub feed: FeedConfig,
    pub seller: Option<SellerConfig>,
    pub market: Option<MarketConfig>,
}

impl Config {
    /// Loads configuration for `platform` from the process environment.
    pub fn from_env(platform: Platform) -> Result<Self> {
        Self::from_lookup(platform, |name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(platform: Platform, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        let feed = FeedConfig {
            url: vars.optional("FEED_URL", DEFAULT_FEED_URL),
            archive_member: vars.optional("FEED_ARCHIVE_MEMBER", DEFAULT_ARCHIVE_MEMBER),
        };

        let seller = if platform.includes_seller() {
            Some(SellerConfig {
                client_id: vars.required("CLIENT_ID")?,
                token: vars.required("SELLER_TOKEN")?,
                api_url: vars.optional("SELLER_API_URL", DEFAULT_SELLER_API_URL),
                limits: BatchLimits {
                    stocks: vars.batch_size("SELLER_STOCK_BATCH", SELLER_LIMITS.stocks)?,
                    prices: vars.batch_size("SELLER_PRICE_BATCH", SELLER_LIMITS.prices)?,
                },
            })
        } else {
            None
        };

        let market = if platform.includes_market() {
            Some(MarketConfig {
                token: vars.required("MARKET_TOKEN")?,
                api_url: vars.optional("MARKET_API_URL", DEFAULT_MARKET_API_URL),
                channels: vec![
                    MarketChannel {
                        label: "FBS",
                        campaign_id: vars.required("FBS_ID")?,
                        warehouse_id: vars.number("WAREHOUSE_FBS_ID")?,
                    },
                    MarketChannel {
                        label: "DBS",
                        campaign_id: vars.required("DBS_ID")?,
                        warehouse_id: vars.number("WAREHOUSE_DBS_ID")?,
                    },
                ],
                limits: BatchLimits {
                    stocks: vars.batch_size("MARKET_STOCK_BATCH", MARKET_LIMITS.stocks)?,
                    prices: vars.batch_size("MARKET_PRICE_BATCH", MARKET_LIMITS.prices)?,
                },
            })
        } else {
            None
        };

        debug!(
            "Configuration loaded (seller: {}, market: {})",
            seller.is_some(),
            market.is_some()
        );
        Ok(Self {
            feed,
            seller,
            market,
        })
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| SyncError::ConfigurationMissing(name.to_string()))
    }

    fn optional(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn number(&self, name: &str) -> Result<u64> {
        let value = self.required(name)?;
        value
            .parse::<u64>()
            .map_err(|e| SyncError::ConfigurationInvalid {
                name: name.to_string(),
                reason: format!("'{value}' is not a number: {e}"),
            })
    }

    fn batch_size(&self, name: &str, default: usize) -> Result<usize> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        match value.parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(SyncError::ConfigurationInvalid {
                name: name.to_string(),
                reason: format!("'{value}' is not a positive batch size"),
            }),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
