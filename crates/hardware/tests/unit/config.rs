//! # Configuration Tests
//!
//! Defaults, JSON deserialization, file loading, and device opening.

use at91io_core::common::PhysAddr;
use at91io_core::config::{AccessConfig, ConfigError};
use pretty_assertions::assert_eq;
use std::io::Write;
use std::path::PathBuf;

#[test]
fn test_config_default() {
    let config = AccessConfig::default();
    assert_eq!(config.device, PathBuf::from("/dev/mem"));
    assert!(config.sync);
    assert_eq!(config.min_addr, 0);
}

#[test]
fn test_empty_json_uses_defaults() {
    let config = AccessConfig::from_json("{}").unwrap();
    assert_eq!(config, AccessConfig::default());
}

#[test]
fn test_json_deserialization_full() {
    let json = r#"{
        "device": "/dev/fake-mem",
        "sync": false,
        "min_addr": 4026531840
    }"#;
    let config = AccessConfig::from_json(json).unwrap();
    assert_eq!(
        config,
        AccessConfig {
            device: PathBuf::from("/dev/fake-mem"),
            sync: false,
            min_addr: 0xf000_0000,
        }
    );
}

#[test]
fn test_json_partial_override() {
    let config = AccessConfig::from_json(r#"{ "sync": false }"#).unwrap();
    assert_eq!(config.device, PathBuf::from("/dev/mem"));
    assert!(!config.sync);
}

#[test]
fn test_unknown_field_rejected() {
    let err = AccessConfig::from_json(r#"{ "verbose": 3 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
    assert!(err.to_string().contains("verbose"), "{err}");
}

#[test]
fn test_malformed_json_rejected() {
    assert!(matches!(
        AccessConfig::from_json("{ device: "),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_min_addr_out_of_range_rejected() {
    assert!(AccessConfig::from_json(r#"{ "min_addr": 4294967296 }"#).is_err());
}

#[test]
fn test_permits_lower_bound() {
    let config = AccessConfig {
        min_addr: 0xf000_0000,
        ..AccessConfig::default()
    };
    assert!(config.permits(PhysAddr(0xf000_0000)));
    assert!(config.permits(PhysAddr(0xfc03_8004)));
    assert!(!config.permits(PhysAddr(0x2000_0000)));
    assert!(AccessConfig::default().permits(PhysAddr(0)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "device": "/tmp/regs", "min_addr": 256 }}"#).unwrap();
    let config = AccessConfig::load(file.path()).unwrap();
    assert_eq!(config.device, PathBuf::from("/tmp/regs"));
    assert_eq!(config.min_addr, 256);
    assert!(config.sync);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match AccessConfig::load(&path) {
        Err(ConfigError::Io { path: p, source }) => {
            assert_eq!(p, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_open_device_on_regular_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = AccessConfig {
        device: file.path().to_path_buf(),
        sync: false,
        min_addr: 0,
    };
    let mem = config.open_device().unwrap();
    assert_eq!(mem.path(), file.path());
}

#[test]
fn test_open_device_missing() {
    let dir = tempfile::tempdir().unwrap();
    let config = AccessConfig {
        device: dir.path().join("no-such-mem"),
        ..AccessConfig::default()
    };
    assert_eq!(
        config.open_device().unwrap_err().kind(),
        std::io::ErrorKind::NotFound
    );
}
