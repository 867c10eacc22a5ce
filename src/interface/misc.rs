//! Logging and configuration shared by the binaries.
//! Library code only ever talks to the `log` facade; installing a backend is
//! left to whoever owns `main`.

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV, ZERO_DEVICE, ZERO_DEVICE_ENV};
use log::LevelFilter;
use std::path::PathBuf;

/// Settings a scenario run depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkelConfig {
    /// Number of `-v` flags; 0 keeps whatever `LIND_SKEL_LOG` says.
    pub verbosity: u8,
    /// Device mapped by the mmap scenario.
    pub zero_device: PathBuf,
}

impl Default for SkelConfig {
    fn default() -> Self {
        SkelConfig {
            verbosity: 0,
            zero_device: PathBuf::from(ZERO_DEVICE),
        }
    }
}

impl SkelConfig {
    /// Defaults, with `LIND_SKEL_ZERO_DEVICE` applied if set and non-empty.
    pub fn from_env() -> Self {
        let mut config = SkelConfig::default();
        if let Some(dev) = std::env::var_os(ZERO_DEVICE_ENV) {
            if !dev.is_empty() {
                config.zero_device = PathBuf::from(dev);
            }
        }
        config
    }
}

/// Map a `-v` count onto a level.  `None` means "leave the env filter alone".
pub fn verbosity_filter(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::Info),
        2 => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// Install `env_logger` on stderr.  Safe to call more than once; later calls
/// are no-ops.
pub fn init_logging(verbosity: u8) {
    let env = env_logger::Env::default().filter_or(LOG_ENV, DEFAULT_LOG_FILTER);
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(level) = verbosity_filter(verbosity) {
        builder.filter_level(level);
    }
    let _ = builder.format_timestamp(None).try_init();
}
