//! Configuration and logging setup

use crate::constants::ZERO_DEVICE;
use crate::interface::{init_logging, verbosity_filter, SkelConfig};
use log::LevelFilter;
use std::path::Path;

#[test]
fn test_default_config() {
    let config = SkelConfig::default();
    assert_eq!(config.verbosity, 0);
    assert_eq!(config.zero_device, Path::new(ZERO_DEVICE));
}

#[test]
fn test_verbosity_filter() {
    assert_eq!(verbosity_filter(0), None);
    assert_eq!(verbosity_filter(1), Some(LevelFilter::Info));
    assert_eq!(verbosity_filter(2), Some(LevelFilter::Debug));
    assert_eq!(verbosity_filter(3), Some(LevelFilter::Trace));
    assert_eq!(verbosity_filter(u8::MAX), Some(LevelFilter::Trace));
}

/// Test: installing the logger twice is harmless
#[test]
fn test_init_logging_twice() {
    init_logging(0);
    init_logging(2);
    log::info!("logger installed");
}
