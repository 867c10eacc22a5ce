//! File syscalls
//!
//! Only what the scenarios need: opening a path and closing the resulting
//! descriptor.
use crate::constants::err_const::{get_errno, handle_errno, syscall_error, Errno, SyscallResult};
use crate::interface::Fd;
use log::debug;
use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// Reference to Linux: https://man7.org/linux/man-pages/man2/open.2.html
///
/// Opens `path` on the host with `oflag` and, when `O_CREAT` is set, `mode`.
/// A path containing an interior NUL byte cannot be passed to the host and is
/// rejected with `EINVAL` before any call is made.  Resolution and permission
/// failures come back as the host's errno (`ENOENT`, `EACCES`, ...).
pub fn sys_open(path: &Path, oflag: i32, mode: u32) -> SyscallResult<Fd> {
    let c_path = match CString::new(path.as_os_str().as_bytes()) {
        Ok(c_path) => c_path,
        Err(_) => return Err(syscall_error(Errno::EINVAL, "open", "path contains a NUL byte")),
    };

    let fd = unsafe { libc::open(c_path.as_ptr(), oflag, mode as libc::c_uint) };
    if fd < 0 {
        return Err(handle_errno(get_errno(), "open"));
    }
    debug!("[open] {} -> fd {}", path.display(), fd);
    Ok(Fd::from_raw(fd))
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/close.2.html
///
/// Consumes `fd`.  Closing something that is not open, including a number
/// that was already closed, fails with `EBADF`.
pub fn sys_close(fd: Fd) -> SyscallResult<()> {
    let raw = fd.as_raw();
    let ret = unsafe { libc::close(raw) };
    if ret < 0 {
        return Err(handle_errno(get_errno(), "close"));
    }
    debug!("[close] fd {}", raw);
    Ok(())
}
