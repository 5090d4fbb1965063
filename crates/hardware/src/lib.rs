//! Page-cached physical register access for SAMA5D2/SAMA5D3 and AT91 Linux boards.
//!
//! This crate implements the memory-mapped I/O layer shared by register
//! peek/poke utilities:
//! 1. **Common:** Physical addresses, page constants, and the `MapError` taxonomy.
//! 2. **Memory:** The `/dev/mem` backend, the single-slot page cache, and the register accessor.
//! 3. **Configuration:** Device path, `O_SYNC`, and address bounds from JSON.
//! 4. **Statistics:** Map, unmap, and hit counters for the page cache.
//!
//! Access is single-threaded and unlocked. Concurrent read-modify-write
//! sequences from other processes on the same registers are not excluded.

/// Common types and constants (addresses, page size, errors).
pub mod common;
/// Device access configuration.
pub mod config;
/// Backend, page cache, and register accessor.
pub mod mem;
/// Page cache statistics.
pub mod stats;

/// Mapping error and physical address types.
pub use crate::common::{MapError, PhysAddr};
/// Access configuration; `AccessConfig::default()` targets `/dev/mem`.
pub use crate::config::AccessConfig;
/// Page cache and accessor types.
pub use crate::mem::{DevMem, PageMapCache, RegisterAccessor};
