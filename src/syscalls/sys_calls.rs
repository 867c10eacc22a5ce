//! Process syscalls
//!
//! Thin wrappers over the host's process primitives.  None of them retries:
//! a call either succeeds or hands back the errno the host reported.
use crate::constants::err_const::{get_errno, handle_errno, SyscallResult};
use crate::interface::{ForkResult, Pid, WaitStatus};
use log::debug;

/// Reference to Linux: https://man7.org/linux/man-pages/man2/fork.2.html
///
/// `sys_fork` duplicates the calling process.  The host returns `0` in the new
/// process and the child's pid in the original one; those become
/// [`ForkResult::Child`] and [`ForkResult::Parent`].  A failure to allocate a
/// process slot (`EAGAIN`, `ENOMEM`) is returned as an error and no child
/// exists.
///
/// If the caller has other threads, the child inherits only the calling
/// thread and must restrict itself to async-signal-safe calls (such as
/// [`sys_exit_immediately`]) until it execs or exits.
pub fn sys_fork() -> SyscallResult<ForkResult> {
    let ret = unsafe { libc::fork() };
    if ret < 0 {
        return Err(handle_errno(get_errno(), "fork"));
    }
    // No logging on the child side: the log backend may hold a lock that was
    // taken by a thread that no longer exists in this process.
    match Pid::from_raw(ret) {
        Some(pid) => {
            debug!("[fork] created child {}", pid);
            Ok(ForkResult::Parent(pid))
        }
        None => Ok(ForkResult::Child),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/waitpid.2.html
///
/// Blocks until the specific child `pid` terminates and returns the pid the
/// host matched together with the decoded status.  There is no timeout.
/// `ECHILD` means `pid` is not a waitable child of the caller.  An `EINTR`
/// is reported to the caller rather than retried here.
pub fn sys_waitpid(pid: Pid) -> SyscallResult<(Pid, WaitStatus)> {
    let mut status: libc::c_int = 0;
    let ret = unsafe { libc::waitpid(pid.as_raw(), &mut status, 0) };
    if ret < 0 {
        return Err(handle_errno(get_errno(), "waitpid"));
    }
    let status = WaitStatus::from_raw(status);
    debug!("[waitpid] pid {} returned {} ({})", pid, ret, status);
    // Without WNOHANG the host only returns once something was reaped, so a
    // non-positive value here cannot name a child.
    match Pid::from_raw(ret) {
        Some(matched) => Ok((matched, status)),
        None => Err(handle_errno(libc::ECHILD, "waitpid")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/_exit.2.html
///
/// Terminate the calling process with `code` right away.  No destructors run,
/// stdio buffers are not flushed and `atexit` handlers are skipped, so the
/// status a parent observes is exactly `code & 0xff`.  This is distinct from
/// returning from `main` or calling `std::process::exit`.
pub fn sys_exit_immediately(code: i32) -> ! {
    unsafe { libc::_exit(code) }
}

/// Pid of the calling process.  Never fails.
pub fn sys_getpid() -> libc::pid_t {
    unsafe { libc::getpid() }
}
