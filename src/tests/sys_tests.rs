//! Process call tests for the wrapper layer.
//!
//! These fork real children.  Every child leaves through _exit straight away,
//! which is safe even though the test harness is multi-threaded.

use crate::constants::err_const::{Errno, ErrorKind};
use crate::constants::EXIT_CODE;
use crate::interface::{ForkResult, Pid, WaitStatus};
use crate::syscalls::*;
use crate::tests::*;

fn spawn_exiting(code: i32) -> Pid {
    match sys_fork().unwrap() {
        ForkResult::Child => sys_exit_immediately(code),
        ForkResult::Parent(pid) => pid,
    }
}

/// Test: the parent gets a positive pid and waitpid hands the same pid back
#[test]
fn test_fork_waitpid_pid_round_trip() {
    let _guard = test_setup();

    let child = spawn_exiting(0);
    assert!(child.as_raw() > 0);
    assert_ne!(child.as_raw(), sys_getpid());

    let (matched, status) = sys_waitpid(child).unwrap();
    assert_eq!(matched, child);
    assert!(status.exited());
}

/// Test: an immediate exit code reaches the parent unchanged
#[test]
fn test_child_exit_code_propagates() {
    let _guard = test_setup();

    let child = spawn_exiting(EXIT_CODE);
    let (_, status) = sys_waitpid(child).unwrap();

    assert!(status.exited());
    assert!(!status.signaled());
    assert_eq!(status.exit_status(), Some(EXIT_CODE));
    assert_eq!(status.term_signal(), None);
}

/// Test: exit codes are truncated to 8 bits, like any other exit
#[test]
fn test_exit_code_truncated_to_byte() {
    let _guard = test_setup();

    let child = spawn_exiting(256 + 7);
    let (_, status) = sys_waitpid(child).unwrap();
    assert_eq!(status.exit_status(), Some(7));
}

/// Test: a child killed by a signal decodes as signaled, not exited
#[test]
fn test_signaled_child_decodes_as_signal() {
    let _guard = test_setup();

    let child = match sys_fork().unwrap() {
        ForkResult::Child => unsafe {
            libc::raise(libc::SIGKILL);
            libc::_exit(0)
        },
        ForkResult::Parent(pid) => pid,
    };
    let (matched, status) = sys_waitpid(child).unwrap();

    assert_eq!(matched, child);
    assert!(!status.exited());
    assert!(status.signaled());
    assert_eq!(status.exit_status(), None);
    assert_eq!(status.term_signal(), Some(libc::SIGKILL));
}

/// Test: waiting on a pid that is not our child fails with ECHILD
#[test]
fn test_waitpid_non_child_is_echild() {
    let own = Pid::from_raw(sys_getpid()).unwrap();

    let err = sys_waitpid(own).unwrap_err();
    assert_eq!(err.errno(), Some(Errno::ECHILD));
    assert_eq!(err.kind(), ErrorKind::InvalidHandle);
    assert_eq!(err.call, "waitpid");
}

/// Test: a child can only be reaped once
#[test]
fn test_waitpid_twice_is_echild() {
    let _guard = test_setup();

    let child = spawn_exiting(1);
    sys_waitpid(child).unwrap();

    let err = sys_waitpid(child).unwrap_err();
    assert_eq!(err.errno(), Some(Errno::ECHILD));
}

#[test]
fn test_pid_rejects_non_positive() {
    assert_eq!(Pid::from_raw(0), None);
    assert_eq!(Pid::from_raw(-1), None);
    assert_eq!(Pid::from_raw(17).map(Pid::as_raw), Some(17));
}

#[test]
fn test_wait_status_display() {
    assert_eq!(exited_status(123).to_string(), "exited with 123");
    assert_eq!(signaled_status(9).to_string(), "killed by signal 9");
    assert_eq!(WaitStatus::from_raw(0x57f).exit_status(), None);
}
