//! Producer worker loop

use std::sync::Arc;

use tracing::{debug, info};

use crate::queue::BoundedQueue;
use crate::source::{WorkItem, WorkItemSource};

/// Drain the source into the queue until it is exhausted or a stop request
/// interrupts a blocked enqueue. Returns the number of items published.
///
/// An item in flight when the stop arrives is dropped, not requeued; a stop
/// request authorizes discarding not-yet-queued work.
pub(crate) fn run<S>(mut source: S, queue: Arc<BoundedQueue<WorkItem>>) -> u64
where
    S: WorkItemSource,
{
    let mut produced = 0u64;

    while let Some(item) = source.next_item() {
        match queue.enqueue(item) {
            Ok(()) => {
                produced += 1;
                info!(
                    seq = produced,
                    depth = queue.len(),
                    item_id = item.id,
                    "produced item"
                );
            }
            Err(_) => {
                debug!(dropped_item = item.id, produced, "producer interrupted");
                return produced;
            }
        }
    }

    info!(produced, "work-item source exhausted, producer done");
    produced
}
