//! Watch Stock Sync - vendor inventory to marketplace seller APIs
//!
//! Downloads the vendor's stock sheet, reconciles it against each
//! marketplace catalog and pushes stock levels and prices in
//! platform-sized batches.

pub mod app;
pub mod batch;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod marketplace;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod sync;

pub use app::{report_failure, run, RunSummary};
pub use config::{Config, Platform};
pub use error::{Result, SyncError};
pub use models::{InventoryRecord, PriceUpdate, StockUpdate};
