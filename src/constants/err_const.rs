//! Errno values and the error type every wrapper returns.
//!
//! The host reports failure through a sentinel return plus the thread's
//! `errno`.  The wrapper layer never lets the sentinel escape: it reads
//! `errno` immediately and folds both into a [`SyscallError`], which keeps
//! the name of the failing call next to the reason it failed.

// Let's not have clippy warn for EAGAIN, etc.
#![allow(clippy::upper_case_acronyms)]

use log::debug;
use std::fmt;
use thiserror::Error;

macro_rules! reversible_enum {
    ($(#[$settings: meta])* $visibility: vis enum $enumname:ident {
        $($valuename: ident = $value: expr,)*
    }) => {
        $(#[$settings])*
        $visibility enum $enumname {
            $($valuename = $value,)*
        }

        impl $enumname {
            $visibility fn from_discriminant(v: i32) -> Option<Self> {
                match v {
                    $($value => Some($enumname::$valuename),)*
                    _ => None,
                }
            }

            $visibility fn name(self) -> &'static str {
                match self {
                    $($enumname::$valuename => stringify!($valuename),)*
                }
            }
        }
    }
}

reversible_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[repr(i32)]
    /// Errno values for the calls the wrapper layer exposes
    #[non_exhaustive]
    pub enum Errno {
        EPERM = 1,	// Operation not permitted
        ENOENT = 2,	// No such file or directory
        ESRCH = 3,	// No such process
        EINTR = 4,	// Interrupted system call
        EIO = 5,	// I/O error
        ENXIO = 6,	// No such device or address
        E2BIG = 7,	// Argument list too long
        ENOEXEC = 8,	// Exec format error
        EBADF = 9,	// Bad file number
        ECHILD = 10,	// No child processes
        EAGAIN = 11,	// Try again
        ENOMEM = 12,	// Out of memory
        EACCES = 13,	// Permission denied
        EFAULT = 14,	// Bad address
        ENOTBLK = 15,	// Block device required
        EBUSY = 16,	// Device or resource busy
        EEXIST = 17,	// File exists
        EXDEV = 18,	// Cross-device link
        ENODEV = 19,	// No such device
        ENOTDIR = 20,	// Not a directory
        EISDIR = 21,	// Is a directory
        EINVAL = 22,	// Invalid argument
        ENFILE = 23,	// File table overflow
        EMFILE = 24,	// Too many open files
        ENOTTY = 25,	// Not a typewriter
        ETXTBSY = 26,	// Text file busy
        EFBIG = 27,	// File too large
        ENOSPC = 28,	// No space left on device
        ESPIPE = 29,	// Illegal seek
        EROFS = 30,	// Read-only file system
        EMLINK = 31,	// Too many links
        EPIPE = 32,	// Broken pipe
        EDOM = 33,	// Math argument out of domain of func
        ERANGE = 34,	// Math result not representable
        EDEADLK = 35,	// Resource deadlock would occur
        ENAMETOOLONG = 36,	// File name too long
        ENOLCK = 37,	// No record locks available
        ENOSYS = 38,	// Function not implemented
        ENOTEMPTY = 39,	// Directory not empty
        ELOOP = 40,	// Too many symbolic links encountered
        EOVERFLOW = 75,	// Value too large for defined data type
        EBADFD = 77,	// File descriptor in bad state
    }
}

impl fmt::Display for Errno {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse classification of why a call failed.
///
/// Callers that only care whether a resource ran out, or whether the handle
/// they passed was bad, match on this instead of individual errno values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Process table slot, memory or descriptor could not be allocated.
    ResourceExhausted,
    /// Descriptor, child or region does not refer to anything the caller owns.
    InvalidHandle,
    PermissionDenied,
    /// Path or device could not be resolved.
    NotFound,
    InvalidArgument,
    Interrupted,
    Other,
}

/// A failed wrapper call: which call, and the errno the host reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{call} failed: {} (errno {code})", errno_label(.code))]
pub struct SyscallError {
    pub call: &'static str,
    pub code: i32,
}

fn errno_label(code: &i32) -> &'static str {
    Errno::from_discriminant(*code).map_or("unknown errno", Errno::name)
}

impl SyscallError {
    pub fn new(call: &'static str, errno: Errno) -> Self {
        SyscallError {
            call,
            code: errno as i32,
        }
    }

    /// The errno as a known value, if it is one this layer names.
    pub fn errno(&self) -> Option<Errno> {
        Errno::from_discriminant(self.code)
    }

    pub fn kind(&self) -> ErrorKind {
        match self.errno() {
            Some(Errno::EAGAIN | Errno::ENOMEM | Errno::EMFILE | Errno::ENFILE | Errno::ENOSPC) => {
                ErrorKind::ResourceExhausted
            }
            Some(Errno::EBADF | Errno::EBADFD | Errno::ECHILD | Errno::ESRCH) => {
                ErrorKind::InvalidHandle
            }
            Some(Errno::EACCES | Errno::EPERM | Errno::EROFS) => ErrorKind::PermissionDenied,
            Some(Errno::ENOENT | Errno::ENODEV | Errno::ENXIO | Errno::ENOTDIR) => {
                ErrorKind::NotFound
            }
            Some(Errno::EINVAL | Errno::EFAULT | Errno::EOVERFLOW | Errno::ENAMETOOLONG) => {
                ErrorKind::InvalidArgument
            }
            Some(Errno::EINTR) => ErrorKind::Interrupted,
            _ => ErrorKind::Other,
        }
    }
}

/// Result of a wrapper call.
pub type SyscallResult<T> = Result<T, SyscallError>;

pub fn get_errno() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Turn the errno left behind by a failed host call into an error for `call`.
///
/// Must be called before anything else that could overwrite `errno`.
pub fn handle_errno(e: i32, call: &'static str) -> SyscallError {
    debug!("{} returned errno {} ({})", call, e, errno_label(&e));
    SyscallError { call, code: e }
}

/// Build an error for a failure detected inside the wrapper layer itself,
/// before the host was asked.
pub fn syscall_error(e: Errno, call: &'static str, message: &str) -> SyscallError {
    debug!("{}: {} ({})", call, message, e);
    SyscallError::new(call, e)
}
