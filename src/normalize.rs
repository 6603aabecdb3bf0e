//! Normalization of raw vendor feed fields.
//!
//! The vendor sheet encodes quantities as textual markers and prices as
//! decorated strings ("5'990.00 руб."). These pure functions turn them into
//! the values the marketplaces accept.

use log::{debug, warn};

use crate::error::{Result, SyncError};

/// Marker the vendor uses for "more than ten in stock".
pub const MANY_MARKER: &str = ">10";
/// Stock count reported for [`MANY_MARKER`].
pub const MANY_STOCK: u32 = 100;
/// A single remaining piece is kept back and reported as out of stock.
pub const LAST_PIECE_MARKER: &str = "1";

/// Maps a raw quantity marker to a stock count.
///
/// `">10"` becomes 100, `"1"` becomes 0, anything else must be a
/// non-negative integer.
pub fn normalize_quantity(raw: &str) -> Result<u32> {
    let value = raw.trim();
    if value == MANY_MARKER {
        return Ok(MANY_STOCK);
    }
    if value == LAST_PIECE_MARKER {
        return Ok(0);
    }

    match value.parse::<u32>() {
        Ok(count) => {
            debug!("Normalized quantity '{raw}' to {count}");
            Ok(count)
        }
        Err(e) => {
            warn!("Failed to parse quantity '{raw}': {e}");
            Err(SyncError::MalformedQuantity(raw.to_string()))
        }
    }
}

/// Strips a decorated price down to its integer digits.
///
/// Everything after the first `.` is dropped, then every non-digit character
/// is removed: `"5'990.00 руб."` becomes `"5990"`.
pub fn normalize_price(raw: &str) -> Result<String> {
    let integer_part = raw.split('.').next().unwrap_or_default();
    let digits: String = integer_part
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        warn!("Price '{raw}' has no digits before the decimal point");
        return Err(SyncError::MalformedPrice(raw.to_string()));
    }

    debug!("Normalized price '{raw}' to {digits}");
    Ok(digits)
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
