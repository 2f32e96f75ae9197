//! Consumer worker loop

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::stats::{format_hms, AggregateStats};
use crate::queue::BoundedQueue;
use crate::source::{now_unix_ns, WorkItem};

/// Drain the queue until a stop request interrupts a wait. Returns the number
/// of items this worker consumed.
///
/// A stop request issued before this worker ever blocks makes the first
/// `dequeue` fail immediately, so a worker on an empty, permanently stopped
/// queue never blocks at all.
pub(crate) fn run(
    worker: usize,
    queue: Arc<BoundedQueue<WorkItem>>,
    stats: Arc<Mutex<AggregateStats>>,
) -> u64 {
    let mut consumed = 0u64;

    loop {
        let item = match queue.dequeue() {
            Ok(item) => item,
            Err(_) => break,
        };

        let elapsed_ns = now_unix_ns().saturating_sub(item.start_timestamp_ns);
        {
            let mut stats = stats.lock();
            stats.record(elapsed_ns);
        }
        consumed += 1;

        info!(
            worker,
            item_id = item.id,
            elapsed = %format_hms(elapsed_ns),
            "consumed item"
        );
    }

    debug!(worker, consumed, "consumer exiting");
    consumed
}
