//! # Unit Tests
//!
//! Organized by library module.

/// Address arithmetic and error formatting.
pub mod common;

/// JSON configuration loading and defaults.
pub mod config;


/// Map/unmap/hit counters.
pub mod stats;
