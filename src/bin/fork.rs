//! Fork scenario as a standalone program: exit status 0 on success, abort on
//! the first failed check.
use lind_skel::interface::init_logging;
use lind_skel::scenario::fork;
use lind_skel::HostSyscalls;
use log::error;

fn main() {
    init_logging(0);

    if let Err(e) = fork::run(&HostSyscalls::new()) {
        error!("fork: {}", e);
        std::process::abort();
    }
}
