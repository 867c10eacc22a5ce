//! Open, protection and mapping flags as the host platform defines them.
//!
//! The values are taken straight from `libc` so the wrapper layer can hand
//! them to the kernel without translation.

// ===== Open flags =====
pub const O_RDONLY: i32 = libc::O_RDONLY;
pub const O_RDWR: i32 = libc::O_RDWR;
pub const O_CREAT: i32 = libc::O_CREAT;

// ===== Memory protection =====
pub const PROT_NONE: i32 = libc::PROT_NONE;
pub const PROT_READ: i32 = libc::PROT_READ;
pub const PROT_WRITE: i32 = libc::PROT_WRITE;

// ===== Mapping flags =====
pub const MAP_SHARED: i32 = libc::MAP_SHARED;
pub const MAP_PRIVATE: i32 = libc::MAP_PRIVATE;
pub const MAP_ANONYMOUS: i32 = libc::MAP_ANONYMOUS;
pub const MAP_FIXED: i32 = libc::MAP_FIXED;

/// Distinguished "mapping failed" address returned by the host `mmap`.
/// Never handed out by the wrapper layer; only compared against.
pub const MAP_FAILED: *mut libc::c_void = libc::MAP_FAILED;

/// Page size assumed when the host will not report one.  The real value
/// comes from `page_size()` in the wrapper layer.
pub const DEFAULT_PAGESIZE: usize = 4096;
