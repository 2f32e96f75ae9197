//! Host Process Scanner
//!
//! Enumerates processes on the local host, filtered by owner UID, and yields
//! one work item per match. The snapshot is taken once at construction so the
//! sequence is finite and stable for the lifetime of a pipeline run.

use sysinfo::System;

use super::{WorkItem, WorkItemSource};

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Work-item source backed by a snapshot of host processes owned by one UID
pub struct ProcessScanner {
    items: std::vec::IntoIter<WorkItem>,
}

impl ProcessScanner {
    /// Snapshot the host's process table and keep processes owned by `uid`
    pub fn new(uid: u32) -> Self {
        Self {
            items: Self::snapshot(uid).into_iter(),
        }
    }

    /// Enumerate processes owned by `uid` as work items, ordered by PID.
    ///
    /// `sysinfo` reports process start times in whole seconds since the UNIX
    /// epoch; they are widened to nanoseconds to match the pipeline's
    /// timestamp unit.
    pub fn snapshot(uid: u32) -> Vec<WorkItem> {
        let mut sys = System::new_all();
        sys.refresh_all();

        let uid_str = uid.to_string();
        let mut items: Vec<WorkItem> = sys
            .processes()
            .iter()
            .filter(|(_pid, process)| {
                process
                    .user_id()
                    .map(|u| u.to_string() == uid_str)
                    .unwrap_or(false)
            })
            .map(|(pid, process)| WorkItem {
                id: pid.as_u32() as u64,
                start_timestamp_ns: process.start_time().saturating_mul(NANOS_PER_SEC),
            })
            .collect();

        items.sort_unstable_by_key(|item| item.id);
        items
    }
}

impl WorkItemSource for ProcessScanner {
    fn next_item(&mut self) -> Option<WorkItem> {
        self.items.next()
    }
}
