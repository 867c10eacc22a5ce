//! The wrapper layer the scenarios are written against.
//!
//! The free `sys_*` functions talk to the host directly.  Scenarios go
//! through the [`Syscalls`] trait instead, so the same scenario code can run
//! on the host ([`HostSyscalls`]) or against a scripted layer in tests.
pub mod fs_calls;
pub mod mem_calls;
pub mod sys_calls;

pub use fs_calls::{sys_close, sys_open};
pub use mem_calls::{page_size, round_up_page, sys_mmap, sys_munmap, sys_munmap_raw};
pub use sys_calls::{sys_exit_immediately, sys_fork, sys_getpid, sys_waitpid};

use crate::constants::err_const::SyscallResult;
use crate::handles::{HandleTable, MapEntry};
use crate::interface::{Fd, ForkResult, MappedRegion, Pid, WaitStatus};
use log::warn;
use std::path::Path;
use std::ptr::NonNull;

/// Process and memory primitives with a uniform `Result` convention.
///
/// Every operation is synchronous and returns as soon as the host answers.
/// Nothing retries internally; retry policy belongs to the caller.
pub trait Syscalls {
    fn fork(&self) -> SyscallResult<ForkResult>;

    fn waitpid(&self, pid: Pid) -> SyscallResult<(Pid, WaitStatus)>;

    /// Terminate now with `code`, skipping all unwinding and cleanup.
    fn exit_immediately(&self, code: i32) -> !;

    fn open(&self, path: &Path, oflag: i32, mode: u32) -> SyscallResult<Fd>;

    fn mmap(
        &self,
        hint: Option<NonNull<u8>>,
        len: usize,
        prot: i32,
        flags: i32,
        fd: Option<&Fd>,
        offset: libc::off_t,
    ) -> SyscallResult<MappedRegion>;

    fn munmap(&self, region: MappedRegion) -> SyscallResult<()>;

    fn close(&self, fd: Fd) -> SyscallResult<()>;

    /// Ledger of handles this layer has outstanding, if it keeps one.
    fn handles(&self) -> Option<&HandleTable> {
        None
    }
}

/// Pass-through to the host, recording every handle it hands out.
#[derive(Debug, Default)]
pub struct HostSyscalls {
    handles: HandleTable,
}

impl HostSyscalls {
    pub fn new() -> Self {
        HostSyscalls::default()
    }
}

impl Syscalls for HostSyscalls {
    fn fork(&self) -> SyscallResult<ForkResult> {
        sys_fork()
    }

    fn waitpid(&self, pid: Pid) -> SyscallResult<(Pid, WaitStatus)> {
        sys_waitpid(pid)
    }

    fn exit_immediately(&self, code: i32) -> ! {
        sys_exit_immediately(code)
    }

    fn open(&self, path: &Path, oflag: i32, mode: u32) -> SyscallResult<Fd> {
        let fd = sys_open(path, oflag, mode)?;
        self.handles.record_open(fd.as_raw(), path, oflag);
        Ok(fd)
    }

    fn mmap(
        &self,
        hint: Option<NonNull<u8>>,
        len: usize,
        prot: i32,
        flags: i32,
        fd: Option<&Fd>,
        offset: libc::off_t,
    ) -> SyscallResult<MappedRegion> {
        let region = sys_mmap(hint, len, prot, flags, fd, offset)?;
        self.handles.record_map(
            region.addr(),
            MapEntry {
                len: region.len(),
                prot: region.prot(),
                flags,
                backing_fd: fd.map(Fd::as_raw),
            },
        );
        Ok(region)
    }

    fn munmap(&self, region: MappedRegion) -> SyscallResult<()> {
        let addr = region.addr();
        sys_munmap(region)?;
        if self.handles.record_unmap(addr).is_none() {
            warn!("munmap of {:#x}, which this layer never mapped", addr);
        }
        Ok(())
    }

    fn close(&self, fd: Fd) -> SyscallResult<()> {
        let raw = fd.as_raw();
        sys_close(fd)?;
        if self.handles.record_close(raw).is_none() {
            warn!("close of fd {}, which this layer never opened", raw);
        }
        Ok(())
    }

    fn handles(&self) -> Option<&HandleTable> {
        Some(&self.handles)
    }
}
