//! Domain types shared by the feed, the reconciler and the marketplace clients.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One row of the vendor inventory sheet.
///
/// Fields are kept as the raw text the vendor publishes; normalization
/// happens when the record is matched against a marketplace catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Vendor article code, matched against marketplace offer ids
    pub code: String,
    /// Raw quantity marker (">10", "1" or a number)
    pub quantity: String,
    /// Raw decorated price ("5'990.00 руб.")
    pub price: String,
}

impl InventoryRecord {
    pub fn new(
        code: impl Into<String>,
        quantity: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}

/// Currency of a price update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Rub,
}

impl Currency {
    /// ISO code used by the Seller platform
    pub fn iso_code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
        }
    }

    /// Legacy code used by the Market platform
    pub fn market_code(&self) -> &'static str {
        match self {
            Currency::Rub => "RUR",
        }
    }
}

/// New stock level for one marketplace offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub offer_id: String,
    pub warehouse_id: Option<u64>,
    pub count: u32,
    pub timestamp: DateTime<Utc>,
}

impl StockUpdate {
    /// Timestamp as sent to the marketplaces, e.g. `2024-03-01T12:00:00Z`
    pub fn updated_at(&self) -> String {
        self.timestamp.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    pub fn is_in_stock(&self) -> bool {
        self.count != 0
    }
}

/// New price for one marketplace offer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceUpdate {
    pub offer_id: String,
    /// Integer digits only, e.g. "5990"
    pub price: String,
    pub currency: Currency,
}

/// Current UTC time truncated to whole seconds
pub fn now_seconds() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn updated_at_has_second_precision_and_z_suffix() {
        let update = StockUpdate {
            offer_id: "A".to_string(),
            warehouse_id: None,
            count: 3,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 9).unwrap(),
        };
        assert_eq!(update.updated_at(), "2024-03-01T12:05:09Z");
    }

    #[test]
    fn now_seconds_has_no_fraction() {
        assert_eq!(now_seconds().timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn currency_codes() {
        assert_eq!(Currency::Rub.iso_code(), "RUB");
        assert_eq!(Currency::Rub.market_code(), "RUR");
    }
}
