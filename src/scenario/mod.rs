//! Fail-fast scenarios over the wrapper layer.
//!
//! A scenario is a straight line of synchronous steps.  Each step either
//! succeeds or produces a [`ScenarioError`], and `?` makes sure nothing after
//! the first failure runs.  The leaf binaries turn that error into an abort;
//! the runner turns it into a `FAIL` line.

pub mod fork;
pub mod mmap;

use crate::constants::err_const::SyscallError;
use crate::handles::HandleTable;
use crate::interface::SkelConfig;
use crate::syscalls::{HostSyscalls, Syscalls};
use log::{error, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The wrapper layer reported failure.
    #[error("{step}: {source}")]
    Syscall {
        step: &'static str,
        #[source]
        source: SyscallError,
    },
    /// A call succeeded but its result is not what the scenario requires.
    #[error("{step}: expected {expected}, got {actual}")]
    Check {
        step: &'static str,
        expected: String,
        actual: String,
    },
    /// Descriptors or mappings outlived the scenario.
    #[error("scenario leaked {fds} descriptor(s) and {mappings} mapping(s)")]
    Leaked { fds: usize, mappings: usize },
}

impl ScenarioError {
    /// Name of the step that failed, if the failure belongs to one.
    pub fn step(&self) -> Option<&'static str> {
        match self {
            ScenarioError::Syscall { step, .. } | ScenarioError::Check { step, .. } => Some(*step),
            ScenarioError::Leaked { .. } => None,
        }
    }
}

pub type ScenarioResult = Result<(), ScenarioError>;

/// Attach a step name to a wrapper result.
pub trait StepExt<T> {
    fn step(self, step: &'static str) -> Result<T, ScenarioError>;
}

impl<T> StepExt<T> for Result<T, SyscallError> {
    fn step(self, step: &'static str) -> Result<T, ScenarioError> {
        self.map_err(|source| ScenarioError::Syscall { step, source })
    }
}

/// Fail the current step unless `$actual == $expected`.
#[macro_export]
macro_rules! check_eq {
    ($actual:expr, $expected:expr, $step:expr) => {{
        let actual = $actual;
        let expected = $expected;
        if actual != expected {
            return Err($crate::scenario::ScenarioError::Check {
                step: $step,
                expected: format!("{:?}", expected),
                actual: format!("{:?}", actual),
            });
        }
    }};
}

/// Fail the current step unless `$cond` holds.  The optional third argument
/// describes what was observed instead.
#[macro_export]
macro_rules! check {
    ($cond:expr, $step:expr) => {
        $crate::check!($cond, $step, "false")
    };
    ($cond:expr, $step:expr, $actual:expr) => {
        if !$cond {
            return Err($crate::scenario::ScenarioError::Check {
                step: $step,
                expected: stringify!($cond).to_string(),
                actual: $actual.to_string(),
            });
        }
    };
}

/// Fails with [`ScenarioError::Leaked`] if anything is still in `handles`.
pub fn verify_no_leaks(handles: &HandleTable) -> ScenarioResult {
    if handles.is_empty() {
        return Ok(());
    }
    error!("descriptors still open: {:?}", handles.outstanding_fds());
    Err(ScenarioError::Leaked {
        fds: handles.open_fds(),
        mappings: handles.live_mappings(),
    })
}

/// A named scenario that can be run on the host.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    run: fn(&HostSyscalls, &SkelConfig) -> ScenarioResult,
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario").field("name", &self.name).finish()
    }
}

fn run_fork(sys: &HostSyscalls, _config: &SkelConfig) -> ScenarioResult {
    fork::run(sys)
}

fn run_mmap(sys: &HostSyscalls, config: &SkelConfig) -> ScenarioResult {
    mmap::run_with(sys, &mmap::MmapParams::from_config(config))
}

static SCENARIOS: [Scenario; 2] = [
    Scenario {
        name: "fork",
        description: "child exits with a fixed code, parent reaps it and checks the status",
        run: run_fork,
    },
    Scenario {
        name: "mmap",
        description: "private mapping of the zero device reads as zero and tears down cleanly",
        run: run_mmap,
    },
];

pub fn registry() -> &'static [Scenario] {
    &SCENARIOS
}

pub fn find(name: &str) -> Option<&'static Scenario> {
    SCENARIOS.iter().find(|scenario| scenario.name == name)
}

/// Run `scenario` against a fresh host layer, then check that it released
/// every handle it created.
pub fn run_scenario(scenario: &Scenario, config: &SkelConfig) -> ScenarioResult {
    info!("running scenario {}", scenario.name);
    let sys = HostSyscalls::new();
    (scenario.run)(&sys, config)?;
    if let Some(handles) = sys.handles() {
        verify_no_leaks(handles)?;
    }
    info!("scenario {} passed", scenario.name);
    Ok(())
}
