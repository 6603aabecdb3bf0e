//! Splitting update lists into marketplace-sized batches.

use std::slice::Chunks;

use crate::error::{Result, SyncError};

/// Splits `items` into contiguous chunks of `size`, the last holding the remainder.
///
/// The returned iterator borrows `items`; call again to iterate anew.
pub fn divide<T>(items: &[T], size: usize) -> Result<Chunks<'_, T>> {
    if size == 0 {
        return Err(SyncError::InvalidChunkSize(size));
    }
    Ok(items.chunks(size))
}
