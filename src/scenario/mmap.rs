//! Private mapping of the zero device.
//!
//! Open the device read-only, map `MAP_LENGTH` bytes read/write and private at offset
//! 0, require that it reads as zero, then unmap and close.  Private mappings
//! are copy-on-write, so a read-only descriptor is enough even though the
//! mapping itself is writable.
use super::{ScenarioResult, StepExt};
use crate::constants::{MAP_LENGTH, MAP_PRIVATE, O_RDONLY, PROT_READ, PROT_WRITE, ZERO_DEVICE};
use crate::interface::SkelConfig;
use crate::syscalls::Syscalls;
use crate::{check, check_eq};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmapParams {
    pub device: PathBuf,
    pub length: usize,
}

impl Default for MmapParams {
    fn default() -> Self {
        MmapParams {
            device: PathBuf::from(ZERO_DEVICE),
            length: MAP_LENGTH,
        }
    }
}

impl MmapParams {
    pub fn from_config(config: &SkelConfig) -> Self {
        MmapParams {
            device: config.zero_device.clone(),
            ..MmapParams::default()
        }
    }
}

pub fn run<S: Syscalls>(sys: &S) -> ScenarioResult {
    run_with(sys, &MmapParams::default())
}

pub fn run_with<S: Syscalls>(sys: &S, params: &MmapParams) -> ScenarioResult {
    // A missing device is an environment problem, but it still has to stop
    // the scenario here, before anything is mapped.
    let fd = sys.open(&params.device, O_RDONLY, 0).step("open zero device")?;
    info!("opened {} as fd {}", params.device.display(), fd.as_raw());

    let region = sys
        .mmap(
            None,
            params.length,
            PROT_READ | PROT_WRITE,
            MAP_PRIVATE,
            Some(&fd),
            0,
        )
        .step("mmap zero device")?;
    info!("mapped {:#x} bytes at {:#x}", region.len(), region.addr());

    check_eq!(region.read_word(0), Some(0), "first word of mapping");
    let nonzero = region
        .as_slice()
        .map(|bytes| bytes.iter().filter(|&&b| b != 0).count());
    check_eq!(nonzero, Some(0), "non-zero bytes in mapping");
    // reading must not have changed anything
    check_eq!(region.read_word(0), Some(0), "first word on second read");

    let len = region.len();
    check!(len == params.length, "mapping length", len);

    sys.munmap(region).step("munmap")?;
    sys.close(fd).step("close")?;
    Ok(())
}
