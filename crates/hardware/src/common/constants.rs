//! Global constants.
//!
//! Mapping granularity and device defaults shared by the cache, the
//! `/dev/mem` backend, and configuration.

/// Mapping granularity in bytes (4 KiB).
///
/// Assumed equal to the host page size on every supported board. Not
/// configurable at runtime.
pub const PAGE_SIZE: u32 = 4096;

/// Mask for extracting the in-page offset from an address.
pub const PAGE_MASK: u32 = PAGE_SIZE - 1;

/// Mapping length passed to `mmap`/`munmap`.
pub const MAP_LEN: usize = PAGE_SIZE as usize;

/// Width of a peripheral register in bytes.
pub const REGISTER_BYTES: usize = 4;

/// Default physical-memory character device.
pub const DEV_MEM_PATH: &str = "/dev/mem";
