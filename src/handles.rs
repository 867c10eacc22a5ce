//! Ledger of the descriptors and mappings a wrapper layer has handed out.
//!
//! Every successful open / mmap adds an entry and every successful close /
//! munmap removes one.  Whatever is still in here when a scenario returns was
//! leaked.  Entries only record what this process created, so a fork child
//! gets its own copy of the ledger along with the rest of its memory.

use dashmap::DashMap;
use log::{trace, warn};
use std::path::{Path, PathBuf};

/// What a descriptor in the ledger was opened as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdEntry {
    pub path: PathBuf,
    pub oflag: i32,
}

/// A mapping in the ledger.  Keyed by its base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapEntry {
    pub len: usize,
    pub prot: i32,
    pub flags: i32,
    /// Backing descriptor, `None` for anonymous mappings.
    pub backing_fd: Option<i32>,
}

#[derive(Debug, Default)]
pub struct HandleTable {
    fds: DashMap<i32, FdEntry>,
    mappings: DashMap<usize, MapEntry>,
}

impl HandleTable {
    pub fn new() -> Self {
        HandleTable::default()
    }

    pub fn record_open(&self, fd: i32, path: &Path, oflag: i32) {
        trace!("handles: fd {} -> {}", fd, path.display());
        let entry = FdEntry {
            path: path.to_path_buf(),
            oflag,
        };
        // The kernel just handed this number out, so any stale entry means a
        // close went around the ledger.
        if let Some(stale) = self.fds.insert(fd, entry) {
            warn!(
                "handles: fd {} reused while still recorded for {}",
                fd,
                stale.path.display()
            );
        }
    }

    /// Returns the entry if `fd` was recorded.
    pub fn record_close(&self, fd: i32) -> Option<FdEntry> {
        trace!("handles: close fd {}", fd);
        self.fds.remove(&fd).map(|(_, entry)| entry)
    }

    pub fn record_map(&self, addr: usize, entry: MapEntry) {
        trace!("handles: map {:#x} len {:#x}", addr, entry.len);
        self.mappings.insert(addr, entry);
    }

    pub fn record_unmap(&self, addr: usize) -> Option<MapEntry> {
        trace!("handles: unmap {:#x}", addr);
        self.mappings.remove(&addr).map(|(_, entry)| entry)
    }

    pub fn is_open(&self, fd: i32) -> bool {
        self.fds.contains_key(&fd)
    }

    pub fn mapping(&self, addr: usize) -> Option<MapEntry> {
        self.mappings.get(&addr).map(|entry| *entry)
    }

    pub fn open_fds(&self) -> usize {
        self.fds.len()
    }

    pub fn live_mappings(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fds.is_empty() && self.mappings.is_empty()
    }

    /// Sorted list of descriptors still open, for diagnostics.
    pub fn outstanding_fds(&self) -> Vec<i32> {
        let mut fds: Vec<i32> = self.fds.iter().map(|entry| *entry.key()).collect();
        fds.sort_unstable();
        fds
    }
}
