//! Work Items and Work-Item Sources
//!
//! A source produces a finite sequence of work items for the pipeline's
//! producer. Discovery policy lives entirely in the source; the pipeline only
//! sees `next_item`.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

mod process;
pub use process::ProcessScanner;

/// One unit of work flowing through the pipeline.
///
/// Immutable value; moves by ownership from source to producer to queue to
/// consumer. Timestamps are nanoseconds since the UNIX epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    /// Item identity (the originating process id for scanned items)
    pub id: u64,
    /// When the underlying work started, nanoseconds since the UNIX epoch
    pub start_timestamp_ns: u64,
}

/// A finite sequence of work items.
///
/// `None` means end-of-sequence and is the producer's normal termination,
/// not an error.
pub trait WorkItemSource {
    /// Produce the next work item, or `None` when exhausted
    fn next_item(&mut self) -> Option<WorkItem>;
}

/// In-memory source over a fixed item list, used for tests and synthetic runs
pub struct VecSource {
    items: std::vec::IntoIter<WorkItem>,
}

impl VecSource {
    /// Create a source yielding the given items in order
    pub fn new(items: Vec<WorkItem>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl WorkItemSource for VecSource {
    fn next_item(&mut self) -> Option<WorkItem> {
        self.items.next()
    }
}

/// Current wall-clock time as nanoseconds since the UNIX epoch
pub fn now_unix_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_yields_in_order_then_exhausts() {
        let items = vec![
            WorkItem {
                id: 1,
                start_timestamp_ns: 100,
            },
            WorkItem {
                id: 2,
                start_timestamp_ns: 200,
            },
        ];
        let mut source = VecSource::new(items.clone());
        assert_eq!(source.next_item(), Some(items[0]));
        assert_eq!(source.next_item(), Some(items[1]));
        assert_eq!(source.next_item(), None);
        // Exhaustion is sticky.
        assert_eq!(source.next_item(), None);
    }

    #[test]
    fn test_now_unix_ns_is_nonzero_and_advances() {
        let a = now_unix_ns();
        let b = now_unix_ns();
        assert!(a > 0);
        assert!(b >= a);
    }
}
