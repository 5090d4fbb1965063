//! Physical-memory backend traits.
//!
//! This module defines the seam between the page cache and the operating
//! system. It provides:
//! 1. **`PhysMemory`:** Something that can map one 4 KiB physical page at a time.
//! 2. **`MappedPage`:** An owned, live mapping that unmaps itself exactly once.
//!
//! The production implementation is [`DevMem`](super::devmem::DevMem); tests
//! substitute in-memory backends.

use std::fmt::Debug;
use std::io;
use std::ptr::NonNull;

use crate::common::PhysAddr;

/// A source of page mappings over physical memory.
pub trait PhysMemory {
    /// The owned mapping type produced by [`PhysMemory::map_page`].
    type Page: MappedPage;

    /// Maps the `PAGE_SIZE`-byte physical page starting at `page` read-write and shared.
    ///
    /// `page` is always page-aligned when called by the cache.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the mapping cannot be established.
    fn map_page(&mut self, page: PhysAddr) -> io::Result<Self::Page>;
}

/// A live mapping of one physical page.
///
/// Dropping a `MappedPage` must release the mapping; [`MappedPage::unmap`]
/// is the explicit path that reports the release error instead of discarding it.
/// Either way the mapping is released exactly once.
pub trait MappedPage: Debug {
    /// Returns the address of the first byte of the mapped page.
    ///
    /// The pointer stays valid for `PAGE_SIZE` bytes of reads and writes until
    /// the page is unmapped or dropped.
    fn as_ptr(&self) -> NonNull<u8>;

    /// Releases the mapping.
    ///
    /// # Errors
    ///
    /// Returns the OS error when the unmap syscall fails. The mapping is
    /// considered gone from the caller's point of view either way.
    fn unmap(self) -> io::Result<()>;
}
