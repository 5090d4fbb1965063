//! Physical address type.
//!
//! This module defines a strong type for SoC physical addresses so that raw
//! integers coming from register tables or the command line are not mixed up
//! with in-process pointers or page offsets. It provides:
//! 1. **Type Safety:** A `u32` newtype matching the 32-bit SAMA5/AT91 bus.
//! 2. **Page Arithmetic:** Page base and in-page offset extraction for 4 KiB pages.
//! 3. **Parsing:** `0x`-prefixed hex and decimal input from CLIs and config.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use super::constants::{PAGE_MASK, PAGE_SIZE};

/// A physical address in the SoC address space.
///
/// Values are plain byte addresses as published in the SoC datasheet, e.g.
/// `0xfc038000` for the SAMA5D2 PIO controller. No validation is performed
/// on whether the address decodes to a peripheral.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PhysAddr(pub u32);

impl PhysAddr {
    /// Creates a new physical address from a raw 32-bit value.
    #[inline(always)]
    pub const fn new(addr: u32) -> Self {
        Self(addr)
    }

    /// Returns the raw 32-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the base address of the 4 KiB page containing this address.
    #[inline]
    pub const fn page_base(self) -> Self {
        Self(self.0 & !PAGE_MASK)
    }

    /// Returns the byte offset of this address within its 4 KiB page.
    ///
    /// # Returns
    ///
    /// The page offset in `0..PAGE_SIZE`.
    #[inline]
    pub const fn page_offset(self) -> usize {
        (self.0 & PAGE_MASK) as usize
    }

    /// Returns `true` if this address is the first byte of a page.
    #[inline]
    pub const fn is_page_aligned(self) -> bool {
        self.0 & PAGE_MASK == 0
    }

    /// Returns `true` if both addresses fall in the same 4 KiB page.
    #[inline]
    pub const fn same_page(self, other: Self) -> bool {
        self.page_base().0 == other.page_base().0
    }

    /// Returns `true` if this address is 4-byte aligned (a valid 32-bit register address).
    #[inline]
    pub const fn is_word_aligned(self) -> bool {
        self.0 & 0x3 == 0
    }

    /// Returns the address `bytes` further on, wrapping at the top of the 32-bit space.
    #[inline]
    pub const fn offset(self, bytes: u32) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    /// Returns the byte offset to pass to `mmap` for this address's page.
    #[inline]
    pub(crate) const fn mmap_offset(self) -> u64 {
        self.page_base().0 as u64
    }
}

impl From<u32> for PhysAddr {
    fn from(addr: u32) -> Self {
        Self(addr)
    }
}

impl From<PhysAddr> for u32 {
    fn from(addr: PhysAddr) -> Self {
        addr.0
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl FromStr for PhysAddr {
    type Err = ParseIntError;

    /// Parses `0x`-prefixed hex, or decimal otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_u32(s).map(Self)
    }
}

/// Parses a 32-bit value written as `0x`/`0X`-prefixed hex or plain decimal.
///
/// Surrounding whitespace is ignored. This is the number syntax accepted for
/// both addresses and register values. Hex needs its prefix: `10` is ten,
/// and bare hex digits such as `fc038004` are rejected.
///
/// # Errors
///
/// Returns the underlying `ParseIntError` when the digits are invalid or the
/// value does not fit in 32 bits.
pub fn parse_u32(s: &str) -> Result<u32, ParseIntError> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse::<u32>(),
    }
}

const _: () = assert!(PAGE_SIZE.is_power_of_two());
