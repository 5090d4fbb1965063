//! Memory-mapped register access.
//!
//! This module implements the path from a physical register address to a
//! volatile load or store. It provides:
//! 1. **Backend:** `PhysMemory`/`MappedPage` traits and the `/dev/mem` implementation.
//! 2. **Cache:** `PageMapCache`, which keeps one 4 KiB page mapped between accesses.
//! 3. **Accessor:** `RegisterAccessor`, typed 32-bit reads, writes, and read-modify-writes.
//!
//! A command typically opens the device once, builds one cache, performs its
//! register sequence through [`PageMapCache::regs`], then calls
//! [`PageMapCache::release`]:
//!
//! ```no_run
//! use at91io_core::common::PhysAddr;
//! use at91io_core::mem::{DevMem, PageMapCache};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cache = PageMapCache::new(DevMem::open("/dev/mem")?);
//! let pdsr = cache.regs().read32(PhysAddr(0xfc03_8008))?;
//! println!("PIO_PDSR = {pdsr:#010x}");
//! cache.release()?;
//! # Ok(())
//! # }
//! ```

/// Typed register reads and writes.
pub mod accessor;

/// Single-slot page cache.
pub mod cache;

/// `/dev/mem` backend.
pub mod devmem;

/// Backend traits.
pub mod phys;

pub use accessor::{RegUpdate, RegisterAccessor};
pub use cache::PageMapCache;
pub use devmem::{DevMem, DevMemPage};
pub use phys::{MappedPage, PhysMemory};
