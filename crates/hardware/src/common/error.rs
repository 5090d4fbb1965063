//! Mapping error definitions.
//!
//! Two failure kinds exist, one per syscall. Both are fatal to the register
//! sequence in progress: callers report the error and stop, leaving the
//! hardware in whatever state the completed accesses produced.

use std::io;

use thiserror::Error;

use super::addr::PhysAddr;

/// Failure to establish or tear down a page mapping.
#[derive(Debug, Error)]
pub enum MapError {
    /// `mmap` of the page at `page` failed (permissions, bad range, resources).
    #[error("mmap of page {page} failed: {source}")]
    MapFailed {
        /// Page base that was being mapped.
        page: PhysAddr,
        /// OS error reported by the syscall.
        #[source]
        source: io::Error,
    },

    /// `munmap` of the page at `page` failed, either before a remap or on release.
    #[error("munmap of page {page} failed: {source}")]
    UnmapFailed {
        /// Page base of the mapping being released.
        page: PhysAddr,
        /// OS error reported by the syscall.
        #[source]
        source: io::Error,
    },
}

impl MapError {
    /// Returns the page base the failed syscall was operating on.
    pub const fn page(&self) -> PhysAddr {
        match self {
            Self::MapFailed { page, .. } | Self::UnmapFailed { page, .. } => *page,
        }
    }

    /// Returns the OS error reported by the failed syscall.
    pub const fn os_error(&self) -> &io::Error {
        match self {
            Self::MapFailed { source, .. } | Self::UnmapFailed { source, .. } => source,
        }
    }

    /// Returns `true` for [`MapError::MapFailed`].
    pub const fn is_map_failure(&self) -> bool {
        matches!(self, Self::MapFailed { .. })
    }
}
