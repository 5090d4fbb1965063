//! Page-mapping statistics.
//!
//! This module tracks how effective the single-slot page cache is. It provides:
//! 1. **Syscall counts:** Successful `mmap` and `munmap` calls.
//! 2. **Hits:** Accesses served by the already-mapped page.
//! 3. **Reporting:** Hit rate and a one-line summary for verbose output.

use std::fmt;

/// Counters maintained by [`PageMapCache`](crate::mem::PageMapCache).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Number of successful page mappings.
    pub maps: u64,
    /// Number of successful page unmappings.
    pub unmaps: u64,
    /// Number of `acquire` calls served without any syscall.
    pub hits: u64,
}

impl MapStats {
    /// Total number of successful `acquire` calls (hits plus fresh mappings).
    pub const fn acquires(&self) -> u64 {
        self.hits + self.maps
    }

    /// Number of mappings currently outstanding according to the counters.
    pub const fn live(&self) -> u64 {
        self.maps.saturating_sub(self.unmaps)
    }

    /// Fraction of acquires served from the cached page, in `[0.0, 1.0]`.
    ///
    /// Returns `0.0` before the first acquire.
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        match self.acquires() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}

impl fmt::Display for MapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "maps={} unmaps={} hits={} hit_rate={:.1}%",
            self.maps,
            self.unmaps,
            self.hits,
            self.hit_rate() * 100.0
        )
    }
}
