//! Lind skel test suite
//!
//! Unit tests for the wrapper layer and the scenarios built on it:
//! - process calls (fork / waitpid / _exit) against the real host
//! - open / close and mmap / munmap, including out-of-contract calls
//! - the handle ledger
//! - configuration defaults and logger setup
//! - scenario ordering and fail-fast behaviour against a scripted layer
//!
//! The leaf binaries themselves are exercised from tests/ at the crate root.

mod misc_tests; // config and logging
mod sys_tests; // fork / waitpid / exit

use crate::constants::err_const::{syscall_error, Errno, SyscallResult};
use crate::interface::{Fd, ForkResult, MappedRegion, Pid, WaitStatus};
use crate::syscalls::{sys_mmap, sys_munmap, Syscalls};
use crate::constants::{MAP_ANONYMOUS, MAP_PRIVATE, PROT_READ, PROT_WRITE};
use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};
use std::path::Path;
use std::ptr::NonNull;

lazy_static! {
    // Tests that fork or reap children must not interleave: a stray child
    // from one test must never be what another test's waitpid sees.
    static ref TEST_MUTEX: Mutex<()> = Mutex::new(());
}

/// Setup function for tests that create processes.
/// Returns a lock guard that keeps the test serialized
pub fn test_setup() -> MutexGuard<'static, ()> {
    TEST_MUTEX.lock()
}

/// Status word the host reports for a child that called `_exit(code)`.
pub fn exited_status(code: i32) -> WaitStatus {
    WaitStatus::from_raw((code & 0xff) << 8)
}

/// Status word the host reports for a child killed by `sig`.
pub fn signaled_status(sig: i32) -> WaitStatus {
    WaitStatus::from_raw(sig & 0x7f)
}

/// Descriptor number the scripted layer hands out.  Never closed for real.
pub const SCRIPTED_FD: i32 = 4242;
pub const SCRIPTED_PID: i32 = 31337;

/// A `Syscalls` implementation that answers from a script and records the
/// order of calls.  Mappings are real anonymous pages so scenario code can
/// read them.
pub struct ScriptedSyscalls {
    pub calls: Mutex<Vec<&'static str>>,
    pub fork_error: Option<Errno>,
    /// `None` means "report the pid that fork returned".
    pub wait_pid: Option<i32>,
    pub wait_status: WaitStatus,
    pub open_error: Option<Errno>,
    pub mmap_error: Option<Errno>,
    /// Byte written at the given offset of every mapping before it is returned.
    pub dirty_byte: Option<usize>,
    pub munmap_error: Option<Errno>,
    pub close_error: Option<Errno>,
}

impl Default for ScriptedSyscalls {
    fn default() -> Self {
        ScriptedSyscalls {
            calls: Mutex::new(Vec::new()),
            fork_error: None,
            wait_pid: None,
            wait_status: exited_status(crate::constants::EXIT_CODE),
            open_error: None,
            mmap_error: None,
            dirty_byte: None,
            munmap_error: None,
            close_error: None,
        }
    }
}

impl ScriptedSyscalls {
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    fn log(&self, call: &'static str) {
        self.calls.lock().push(call);
    }

    fn fail(call: &'static str, errno: Option<Errno>) -> SyscallResult<()> {
        match errno {
            Some(e) => Err(syscall_error(e, call, "scripted failure")),
            None => Ok(()),
        }
    }
}

impl Syscalls for ScriptedSyscalls {
    fn fork(&self) -> SyscallResult<ForkResult> {
        self.log("fork");
        Self::fail("fork", self.fork_error)?;
        Ok(ForkResult::Parent(Pid::from_raw(SCRIPTED_PID).unwrap()))
    }

    fn waitpid(&self, pid: Pid) -> SyscallResult<(Pid, WaitStatus)> {
        self.log("waitpid");
        let matched = match self.wait_pid {
            Some(raw) => Pid::from_raw(raw).unwrap(),
            None => pid,
        };
        Ok((matched, self.wait_status))
    }

    fn exit_immediately(&self, code: i32) -> ! {
        panic!("scripted layer never runs the child side (exit {})", code)
    }

    fn open(&self, _path: &Path, _oflag: i32, _mode: u32) -> SyscallResult<Fd> {
        self.log("open");
        Self::fail("open", self.open_error)?;
        Ok(Fd::from_raw(SCRIPTED_FD))
    }

    fn mmap(
        &self,
        _hint: Option<NonNull<u8>>,
        len: usize,
        _prot: i32,
        _flags: i32,
        _fd: Option<&Fd>,
        _offset: libc::off_t,
    ) -> SyscallResult<MappedRegion> {
        self.log("mmap");
        Self::fail("mmap", self.mmap_error)?;
        let mut region = sys_mmap(
            None,
            len,
            PROT_READ | PROT_WRITE,
            MAP_PRIVATE | MAP_ANONYMOUS,
            None,
            0,
        )?;
        if let Some(offset) = self.dirty_byte {
            region.as_mut_slice().unwrap()[offset] = 0xAB;
        }
        Ok(region)
    }

    fn munmap(&self, region: MappedRegion) -> SyscallResult<()> {
        self.log("munmap");
        sys_munmap(region)?;
        Self::fail("munmap", self.munmap_error)
    }

    fn close(&self, fd: Fd) -> SyscallResult<()> {
        self.log("close");
        assert_eq!(fd.as_raw(), SCRIPTED_FD);
        Self::fail("close", self.close_error)
    }
}
