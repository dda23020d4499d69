//! Memory Access Types.
//!
//! This module defines the classification of requests presented to the cache
//! and the outcome of a lookup. These types are used for the following:
//! 1. **Statistics Tracking:** Read and write requests are counted separately.
//! 2. **Dirty Tracking:** Writes mark the resident (or freshly installed) line dirty.
//! 3. **Driver Protocol:** A `Miss` tells the caller to follow up with an install.

use serde::{Deserialize, Serialize};

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessType {
    /// Data read access (load).
    Read,

    /// Data write access (store).
    ///
    /// Marks the line dirty on hit and on the install that follows a miss.
    Write,
}

impl AccessType {
    /// Returns `true` for [`AccessType::Write`].
    #[inline(always)]
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

impl From<bool> for AccessType {
    /// Maps an `is_write` flag onto an access type.
    fn from(is_write: bool) -> Self {
        if is_write { Self::Write } else { Self::Read }
    }
}

/// Outcome of a cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheResult {
    /// The line was resident and valid.
    Hit,
    /// The line was not resident; the caller is expected to install it.
    Miss,
}

impl CacheResult {
    /// Returns `true` if the lookup hit.
    #[inline(always)]
    pub fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}
