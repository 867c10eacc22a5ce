//! Memory syscalls
use crate::constants::err_const::{get_errno, handle_errno, syscall_error, Errno, SyscallResult};
use crate::constants::{DEFAULT_PAGESIZE, MAP_FAILED, MAP_FIXED};
use crate::interface::{Fd, MappedRegion};
use log::debug;
use std::ptr::{self, NonNull};

/// Reference to Linux: https://man7.org/linux/man-pages/man2/getpagesize.2.html
///
/// Page size of the host, as `sysconf(_SC_PAGESIZE)` reports it.
pub fn page_size() -> usize {
    let ret = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    match usize::try_from(ret) {
        Ok(size) if size > 0 => size,
        _ => DEFAULT_PAGESIZE,
    }
}

pub fn round_up_page(length: usize) -> usize {
    let pagesize = page_size();
    if length % pagesize == 0 {
        length
    } else {
        ((length / pagesize) + 1) * pagesize
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/mmap.2.html
///
/// Maps `len` bytes with protection `prot` and `flags`.  `hint` is passed
/// through as the address hint (null when `None`); `fd` is the backing
/// descriptor, or `None` for an anonymous mapping.
///
/// The host's `MAP_FAILED` never reaches the caller; it becomes an error
/// carrying the host errno.  Checked here before asking the host:
/// - `len` must be non-zero
/// - `MAP_FIXED` requires a hint
/// - `offset` must be non-negative and page aligned
pub fn sys_mmap(
    hint: Option<NonNull<u8>>,
    len: usize,
    prot: i32,
    flags: i32,
    fd: Option<&Fd>,
    offset: libc::off_t,
) -> SyscallResult<MappedRegion> {
    if len == 0 {
        return Err(syscall_error(Errno::EINVAL, "mmap", "zero length"));
    }
    if hint.is_none() && flags & MAP_FIXED != 0 {
        return Err(syscall_error(Errno::EINVAL, "mmap", "MAP_FIXED without an address"));
    }
    if offset < 0 || offset as usize % page_size() != 0 {
        return Err(syscall_error(Errno::EINVAL, "mmap", "offset is negative or not aligned"));
    }

    let addr = hint.map_or(ptr::null_mut(), |p| p.as_ptr().cast::<libc::c_void>());
    let raw_fd = fd.map_or(-1, Fd::as_raw);

    let ret = unsafe { libc::mmap(addr, len, prot, flags, raw_fd, offset) };
    if ret == MAP_FAILED {
        return Err(handle_errno(get_errno(), "mmap"));
    }
    debug!(
        "[mmap] fd {} len {:#x} prot {:#x} flags {:#x} -> {:p}",
        raw_fd, len, prot, flags, ret
    );

    match NonNull::new(ret.cast::<u8>()) {
        Some(base) => Ok(unsafe { MappedRegion::from_raw_parts(base, len, prot) }),
        // only reachable with MAP_FIXED at page zero, which the hint check rules out
        None => Err(syscall_error(Errno::EFAULT, "mmap", "host returned a null mapping")),
    }
}

/// Reference to Linux: https://man7.org/linux/man-pages/man2/munmap.2.html
///
/// Releases `region`.  The region is consumed whether or not the host call
/// succeeds, so the same mapping can never be unmapped twice through this
/// function.
pub fn sys_munmap(region: MappedRegion) -> SyscallResult<()> {
    let (base, len) = region.into_raw_parts();
    unsafe { sys_munmap_raw(base.as_ptr(), len) }
}

/// `munmap` on an arbitrary range.  An address that is not page aligned
/// fails with `EINVAL`.
///
/// # Safety
///
/// Nothing may access `addr..addr+len` afterwards; any live `MappedRegion`
/// or reference covering the range becomes dangling.
pub unsafe fn sys_munmap_raw(addr: *mut u8, len: usize) -> SyscallResult<()> {
    let ret = libc::munmap(addr.cast::<libc::c_void>(), len);
    if ret < 0 {
        return Err(handle_errno(get_errno(), "munmap"));
    }
    debug!("[munmap] {:p} len {:#x}", addr, len);
    Ok(())
}
