//! Lind skel - syscall wrapper layer and sanity scenarios
//!
//! This library provides the `sys_*` wrappers a syscall-emulation sandbox is
//! checked through, and two scenarios built on them:
//! - fork: a child exits with a known status and the parent reaps it
//! - mmap: a private mapping of the zero device reads as zero
//!
//! Each scenario also ships as its own executable under src/bin/, which exits
//! 0 on success and aborts on the first failed check.

pub mod constants;
pub mod handles;
pub mod interface;
pub mod scenario;
pub mod syscalls;

#[cfg(test)]
mod tests;

// Re-export the pieces scenario code and the binaries use most
pub use constants::err_const::{Errno, ErrorKind, SyscallError, SyscallResult};
pub use interface::{Fd, ForkResult, MappedRegion, Pid, SkelConfig, WaitStatus};
pub use scenario::{run_scenario, Scenario, ScenarioError, ScenarioResult};
pub use syscalls::{HostSyscalls, Syscalls};
