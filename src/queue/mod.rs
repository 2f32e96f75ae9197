//! Bounded FIFO Queue
//!
//! Capacity-limited producer/consumer queue built from a `parking_lot::Mutex`
//! over a `VecDeque` plus two counting semaphores: `slots_free` bounds
//! producers, `items_available` bounds consumers. Closing the queue
//! interrupts every blocked and future wait, which is the pipeline's stop
//! signal.

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::error::{PipelineError, Result};

mod semaphore;
pub use semaphore::Semaphore;

/// A fixed-capacity FIFO queue with blocking, interruptible operations.
///
/// Invariants, holding whenever no thread is inside the exclusion lock:
/// `0 <= len <= capacity`, `items_available.permits == len`, and
/// `slots_free.permits == capacity - len`. The K-th successful `enqueue` is
/// delivered to the K-th successful `dequeue`.
pub struct BoundedQueue<T> {
    capacity: usize,
    items: Mutex<VecDeque<T>>,
    slots_free: Semaphore,
    items_available: Semaphore,
}

impl<T> BoundedQueue<T> {
    /// Create a queue with the given capacity.
    ///
    /// Capacity is fixed for the lifetime of the queue and must be at least 1.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PipelineError::InvalidCapacity(capacity));
        }
        Ok(Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            slots_free: Semaphore::new(capacity),
            items_available: Semaphore::new(0),
        })
    }

    /// Append an item to the tail, blocking while the queue is full.
    ///
    /// Returns `Interrupted` if the queue is closed before a slot becomes
    /// available; in that case the queue was not mutated and the item is
    /// dropped (a stop request authorizes discarding not-yet-queued work).
    pub fn enqueue(&self, item: T) -> Result<()> {
        self.slots_free.acquire()?;
        {
            let mut items = self.items.lock();
            items.push_back(item);
        }
        self.items_available.release();
        Ok(())
    }

    /// Remove and return the head item, blocking while the queue is empty.
    ///
    /// Returns `Interrupted` if the queue is closed before an item becomes
    /// available.
    pub fn dequeue(&self) -> Result<T> {
        self.items_available.acquire()?;
        let item = {
            let mut items = self.items.lock();
            // Permit accounting guarantees an item here; treat a bare wakeup
            // as an interruption rather than panicking.
            items.pop_front().ok_or(PipelineError::Interrupted)?
        };
        self.slots_free.release();
        Ok(item)
    }

    /// Close the queue, interrupting every blocked and future wait. Idempotent.
    pub fn close(&self) {
        self.items_available.close();
        self.slots_free.close();
    }

    /// Whether the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.items_available.is_closed()
    }

    /// Remove all resident items without signaling.
    ///
    /// Only safe once every worker that might enqueue or dequeue has been
    /// joined; the shutdown coordinator calls this after the join phase.
    pub fn drain_for_shutdown(&self) -> Vec<T> {
        let mut items = self.items.lock();
        items.drain(..).collect()
    }

    /// Instantaneous queue depth (observability only)
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether the queue is currently empty
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Configured capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_zero_capacity_rejected() {
        let queue: Result<BoundedQueue<u32>> = BoundedQueue::new(0);
        assert!(matches!(queue, Err(PipelineError::InvalidCapacity(0))));
    }

    #[test]
    fn test_fifo_order() {
        let queue = BoundedQueue::new(8).unwrap();
        for i in 0..8 {
            queue.enqueue(i).unwrap();
        }
        for i in 0..8 {
            assert_eq!(queue.dequeue().unwrap(), i);
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_length_tracks_operations() {
        let queue = BoundedQueue::new(4).unwrap();
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.len(), 0);

        queue.enqueue("a").unwrap();
        queue.enqueue("b").unwrap();
        assert_eq!(queue.len(), 2);

        queue.dequeue().unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_enqueue_blocks_until_slot_freed() {
        let queue = Arc::new(BoundedQueue::new(1).unwrap());
        queue.enqueue(1).unwrap();

        let (tx, rx) = mpsc::channel();
        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                queue.enqueue(2).unwrap();
                tx.send(()).unwrap();
            })
        };

        // The producer must still be blocked on the full queue.
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        assert_eq!(queue.dequeue().unwrap(), 1);
        rx.recv_timeout(Duration::from_secs(5))
            .expect("producer never unblocked");
        producer.join().unwrap();
        assert_eq!(queue.dequeue().unwrap(), 2);
    }

    #[test]
    fn test_close_interrupts_blocked_dequeue() {
        let queue: Arc<BoundedQueue<u32>> = Arc::new(BoundedQueue::new(2).unwrap());

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.dequeue())
        };

        thread::sleep(Duration::from_millis(50));
        queue.close();

        let result = consumer.join().unwrap();
        assert!(matches!(result, Err(PipelineError::Interrupted)));
    }

    #[test]
    fn test_operations_after_close_fail() {
        let queue = BoundedQueue::new(2).unwrap();
        queue.enqueue(7).unwrap();
        queue.close();
        assert!(queue.is_closed());
        assert!(matches!(queue.enqueue(8), Err(PipelineError::Interrupted)));
        assert!(matches!(queue.dequeue(), Err(PipelineError::Interrupted)));
        // The resident item survives for the shutdown drain.
        assert_eq!(queue.drain_for_shutdown(), vec![7]);
    }

    #[test]
    fn test_conservation_across_threads() {
        let queue = Arc::new(BoundedQueue::new(4).unwrap());
        let total = 200u32;

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for i in 0..total {
                    queue.enqueue(i).unwrap();
                }
            })
        };

        let consumers: Vec<_> = (0..2)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Ok(item) = queue.dequeue() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        producer.join().unwrap();
        // Wait for the consumers to drain everything, then close to release them.
        while !queue.is_empty() {
            thread::sleep(Duration::from_millis(5));
        }
        queue.close();

        let mut all: Vec<u32> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        all.sort_unstable();
        let expected: Vec<u32> = (0..total).collect();
        assert_eq!(all, expected);
    }
}
