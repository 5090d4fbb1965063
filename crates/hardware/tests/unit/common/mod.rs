//! Common type tests.


/// `MapError` variants, accessors, and messages.
pub mod error;
