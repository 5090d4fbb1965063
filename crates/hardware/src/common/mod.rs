//! Common types shared by every part of the register-access layer.
//!
//! This module provides the fundamental building blocks used by the cache,
//! the accessor, and configuration. It includes:
//! 1. **Address Types:** The `PhysAddr` newtype and its page arithmetic.
//! 2. **Constants:** Page size, masks, and the default device path.
//! 3. **Error Handling:** The two-variant `MapError` taxonomy.

/// Physical address type and number parsing.
pub mod addr;

/// Mapping constants.
pub mod constants;

/// Mapping error types.
pub mod error;

pub use addr::{PhysAddr, parse_u32};
pub use constants::{DEV_MEM_PATH, MAP_LEN, PAGE_MASK, PAGE_SIZE};
pub use error::MapError;
