//! Constants shared between the scenarios and whatever runs them.

/// Status the forked child exits with.  The parent asserts on exactly this
/// value, so the two sides must agree.
pub const EXIT_CODE: i32 = 123;

/// Length of the region mapped by the mmap scenario (one page on 4K-page hosts).
pub const MAP_LENGTH: usize = 0x1000;

/// Zero-filled device backing the mmap scenario.
pub const ZERO_DEVICE: &str = "/dev/zero";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

// ===== Environment =====
/// Log filter for `env_logger`, e.g. `LIND_SKEL_LOG=debug`.
pub const LOG_ENV: &str = "LIND_SKEL_LOG";
/// Overrides the device the mmap scenario maps.
pub const ZERO_DEVICE_ENV: &str = "LIND_SKEL_ZERO_DEVICE";
/// Filter used when `LOG_ENV` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";
