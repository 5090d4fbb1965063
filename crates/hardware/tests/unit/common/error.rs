//! # Map Error Tests
//!
//! Checks the two error variants carry the page and OS error through
//! `Display`, `source()`, and the accessor methods.

use at91io_core::common::{MapError, PhysAddr};
use std::error::Error;
use std::io;

fn map_failed() -> MapError {
    MapError::MapFailed {
        page: PhysAddr(0xfc03_8000),
        source: io::Error::from(io::ErrorKind::PermissionDenied),
    }
}

fn unmap_failed() -> MapError {
    MapError::UnmapFailed {
        page: PhysAddr(0xf001_4000),
        source: io::Error::from_raw_os_error(EINVAL),
    }
}

const EINVAL: i32 = 22;

#[test]
fn map_failed_display_names_page() {
    let msg = map_failed().to_string();
    assert!(msg.starts_with("mmap of page 0xfc038000 failed"), "{msg}");
}

#[test]
fn unmap_failed_display_names_page() {
    let msg = unmap_failed().to_string();
    assert!(msg.starts_with("munmap of page 0xf0014000 failed"), "{msg}");
}

#[test]
fn page_accessor() {
    assert_eq!(map_failed().page(), PhysAddr(0xfc03_8000));
    assert_eq!(unmap_failed().page(), PhysAddr(0xf001_4000));
}

#[test]
fn os_error_is_preserved() {
    assert_eq!(
        map_failed().os_error().kind(),
        io::ErrorKind::PermissionDenied
    );
    assert_eq!(unmap_failed().os_error().raw_os_error(), Some(EINVAL));
}

#[test]
fn source_chain_reaches_io_error() {
    let err = map_failed();
    let source = err.source().unwrap();
    assert!(source.downcast_ref::<io::Error>().is_some());
}

#[test]
fn kind_predicate() {
    assert!(map_failed().is_map_failure());
    assert!(!unmap_failed().is_map_failure());
}
