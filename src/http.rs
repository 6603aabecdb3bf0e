//! Shared HTTP plumbing for the feed download and the marketplace clients.

use std::time::Duration;

use log::{debug, error};
use reqwest::{Client, Response};

use crate::error::{Result, SyncError};

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("watch_stock_sync/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by every request of a run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Passes 2xx responses through and turns anything else into [`SyncError::Http`].
pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    debug!("Response status: {status} ({})", response.url());
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    error!("Request failed with status {status}: {body}");
    Err(SyncError::Http {
        status: status.as_u16(),
        body,
    })
}
