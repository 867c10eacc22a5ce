//! Process duplication and exit-status propagation.
//!
//! The child leaves through `exit_immediately(EXIT_CODE)` so that nothing it
//! inherited (buffered output, destructors, atexit handlers) can run and so
//! that the status the parent sees is the one it chose.  The parent then
//! reaps that specific child and requires a normal exit with exactly
//! `EXIT_CODE`.
use super::{ScenarioResult, StepExt};
use crate::constants::EXIT_CODE;
use crate::interface::ForkResult;
use crate::syscalls::Syscalls;
use crate::{check, check_eq};
use log::info;

pub fn run<S: Syscalls>(sys: &S) -> ScenarioResult {
    let child = match sys.fork().step("fork")? {
        ForkResult::Child => sys.exit_immediately(EXIT_CODE),
        ForkResult::Parent(pid) => pid,
    };
    info!("forked child {}", child);

    let (matched, status) = sys.waitpid(child).step("waitpid")?;
    check_eq!(matched, child, "waitpid returns the forked pid");
    check!(status.exited(), "child exits normally", status);
    check_eq!(status.exit_status(), Some(EXIT_CODE), "child exit code");

    info!("child {} {}", child, status);
    Ok(())
}
