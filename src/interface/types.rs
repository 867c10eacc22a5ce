//! Handle types handed out by the wrapper layer.
//!
//! Each type wraps the raw value the host returned, but only ever holds a
//! value that denotes success.  Failure sentinels (`-1`, `MAP_FAILED`) are
//! turned into errors before one of these is constructed.

use crate::constants::{PROT_READ, PROT_WRITE};
use std::fmt;
use std::ptr::NonNull;

/// Identifier of a child process, as seen by its parent.  Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pid(libc::pid_t);

impl Pid {
    /// Returns `None` for `0` and negative values, which never name a child.
    pub fn from_raw(raw: libc::pid_t) -> Option<Pid> {
        if raw > 0 {
            Some(Pid(raw))
        } else {
            None
        }
    }

    pub fn as_raw(self) -> libc::pid_t {
        self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which side of a fork the caller is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForkResult {
    /// The newly created process.  The host returned `0` here.
    Child,
    /// The original process, holding the identifier of its new child.
    Parent(Pid),
}

/// Raw status word filled in by `waitpid`, decoded with the host's `WIF*`
/// macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitStatus(i32);

impl WaitStatus {
    pub fn from_raw(raw: i32) -> WaitStatus {
        WaitStatus(raw)
    }

    /// The child terminated through `exit`/`_exit` rather than a signal.
    pub fn exited(self) -> bool {
        libc::WIFEXITED(self.0)
    }

    /// Exit code, only meaningful when [`WaitStatus::exited`] holds.
    pub fn exit_status(self) -> Option<i32> {
        if self.exited() {
            Some(libc::WEXITSTATUS(self.0))
        } else {
            None
        }
    }

    pub fn signaled(self) -> bool {
        libc::WIFSIGNALED(self.0)
    }

    pub fn term_signal(self) -> Option<i32> {
        if self.signaled() {
            Some(libc::WTERMSIG(self.0))
        } else {
            None
        }
    }
}

impl fmt::Display for WaitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.exit_status() {
            write!(f, "exited with {}", code)
        } else if let Some(sig) = self.term_signal() {
            write!(f, "killed by signal {}", sig)
        } else {
            write!(f, "raw status {:#x}", self.0)
        }
    }
}

/// An open descriptor.
///
/// Deliberately neither `Copy` nor `Clone`, and not closed on drop: it must
/// be handed to `sys_close` exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "descriptors must be closed with sys_close"]
pub struct Fd(i32);

impl Fd {
    /// Wrap a raw descriptor number.  Nothing checks that it is open; this is
    /// how out-of-contract calls (double close, bogus descriptors) are probed.
    pub fn from_raw(raw: i32) -> Fd {
        Fd(raw)
    }

    pub fn as_raw(&self) -> i32 {
        self.0
    }
}

/// A live mapping returned by `sys_mmap`.
///
/// Not `Clone`; `sys_munmap` consumes it, so a region cannot be unmapped
/// twice through this type.  Dropping it without unmapping leaks the region.
#[derive(Debug)]
#[must_use = "mappings must be released with sys_munmap"]
pub struct MappedRegion {
    addr: NonNull<u8>,
    len: usize,
    prot: i32,
}

impl MappedRegion {
    /// # Safety
    ///
    /// `addr..addr+len` must be a mapping created with `prot` that nothing
    /// else will unmap while the returned value is alive.
    pub unsafe fn from_raw_parts(addr: NonNull<u8>, len: usize, prot: i32) -> MappedRegion {
        MappedRegion { addr, len, prot }
    }

    pub fn as_ptr(&self) -> *mut u8 {
        self.addr.as_ptr()
    }

    pub fn addr(&self) -> usize {
        self.addr.as_ptr() as usize
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn prot(&self) -> i32 {
        self.prot
    }

    pub fn is_readable(&self) -> bool {
        self.prot & PROT_READ != 0
    }

    pub fn is_writable(&self) -> bool {
        self.prot & PROT_WRITE != 0
    }

    /// Read the `index`th machine word of the region.
    ///
    /// Returns `None` if the region is not readable or the word would run
    /// past its end.
    pub fn read_word(&self, index: usize) -> Option<usize> {
        let word = std::mem::size_of::<usize>();
        let end = index.checked_mul(word)?.checked_add(word)?;
        if !self.is_readable() || end > self.len {
            return None;
        }
        // mappings are page aligned, so every word offset is aligned too
        let ptr = self.addr.as_ptr().cast::<usize>();
        Some(unsafe { ptr.add(index).read_volatile() })
    }

    pub fn as_slice(&self) -> Option<&[u8]> {
        if !self.is_readable() {
            return None;
        }
        Some(unsafe { std::slice::from_raw_parts(self.addr.as_ptr(), self.len) })
    }

    pub fn as_mut_slice(&mut self) -> Option<&mut [u8]> {
        if !(self.is_readable() && self.is_writable()) {
            return None;
        }
        Some(unsafe { std::slice::from_raw_parts_mut(self.addr.as_ptr(), self.len) })
    }

    pub(crate) fn into_raw_parts(self) -> (NonNull<u8>, usize) {
        (self.addr, self.len)
    }
}
