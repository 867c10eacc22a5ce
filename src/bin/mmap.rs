//! Mmap scenario as a standalone program: exit status 0 on success, abort on
//! the first failed check.
//!
//! Takes no arguments.  `LIND_SKEL_ZERO_DEVICE` replaces the mapped device.
use lind_skel::interface::init_logging;
use lind_skel::scenario::mmap::{self, MmapParams};
use lind_skel::scenario::verify_no_leaks;
use lind_skel::{HostSyscalls, SkelConfig, Syscalls};
use log::error;

fn main() {
    init_logging(0);

    let params = MmapParams::from_config(&SkelConfig::from_env());
    let sys = HostSyscalls::new();
    let result = mmap::run_with(&sys, &params).and_then(|()| match sys.handles() {
        Some(handles) => verify_no_leaks(handles),
        None => Ok(()),
    });
    if let Err(e) = result {
        error!("mmap: {}", e);
        std::process::abort();
    }
}
