//! # Statistics Tests
//!
//! Verifies the derived counters and the summary line.

use at91io_core::stats::MapStats;

#[test]
fn default_is_zeroed() {
    let stats = MapStats::default();
    assert_eq!(stats.acquires(), 0);
    assert_eq!(stats.live(), 0);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
}

#[test]
fn acquires_and_live() {
    let stats = MapStats {
        maps: 3,
        unmaps: 2,
        hits: 5,
    };
    assert_eq!(stats.acquires(), 8);
    assert_eq!(stats.live(), 1);
}

#[test]
fn hit_rate_fraction() {
    let stats = MapStats {
        maps: 1,
        unmaps: 1,
        hits: 3,
    };
    assert!((stats.hit_rate() - 0.75).abs() < 1e-12);
}

#[test]
fn display_summary() {
    let stats = MapStats {
        maps: 1,
        unmaps: 1,
        hits: 1,
    };
    assert_eq!(stats.to_string(), "maps=1 unmaps=1 hits=1 hit_rate=50.0%");
}
