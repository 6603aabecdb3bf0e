//! Error types for watch_stock_sync

use thiserror::Error;

/// Unified error type for sync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Upstream quantity marker is neither a known marker nor an integer
    #[error("Malformed quantity: {0:?}")]
    MalformedQuantity(String),
    /// Upstream price contains no digits before the decimal point
    #[error("Malformed price: {0:?}")]
    MalformedPrice(String),
    /// Batcher was asked for chunks of size zero
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),
    /// Marketplace or feed answered with a non-2xx status
    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },
    /// Request did not complete within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    /// Could not connect to the remote host
    #[error("Connection error: {0}")]
    Connection(#[source] reqwest::Error),
    /// Any other transport failure
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    /// Failed to parse JSON response
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Required environment variable is absent or empty
    #[error("Missing configuration: {0}")]
    ConfigurationMissing(String),
    /// Environment variable present but unusable
    #[error("Invalid configuration for {name}: {reason}")]
    ConfigurationInvalid { name: String, reason: String },
    /// Feed archive could not be opened or lacks the expected member
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    /// Feed spreadsheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    /// Feed CSV export could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Feed sheet is readable but not in the expected layout
    #[error("Unexpected feed format: {0}")]
    FeedFormat(String),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SyncError::Timeout(err)
        } else if err.is_connect() {
            SyncError::Connection(err)
        } else {
            SyncError::Network(err)
        }
    }
}

impl SyncError {
    /// True for failures of the transport itself rather than of the data
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            SyncError::Timeout(_) | SyncError::Connection(_) | SyncError::Network(_)
        )
    }
}

/// Result alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
