//! Pipeline Lifecycle and Shutdown Coordination
//!
//! `Pipeline::start` spawns one producer and N consumers over a shared
//! bounded queue and returns immediately with a handle. `PipelineHandle::stop`
//! drives the shutdown state machine `Running -> Stopping -> Drained ->
//! Reported`: close the queue (waking every blocked wait), join every worker,
//! drain residual items, and emit the final aggregate report.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{PipelineError, Result};
use crate::queue::BoundedQueue;
use crate::source::{WorkItem, WorkItemSource};

mod consumer;
mod producer;
mod stats;

pub use stats::{format_hms, AggregateStats, PipelineReport};

/// Pipeline configuration, supplied once at startup and immutable thereafter
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum number of items resident in the queue
    pub capacity: usize,
    /// Whether to run the producer (a pool can run consumers only)
    pub producer_enabled: bool,
    /// Number of consumer workers
    pub consumers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            capacity: 10,
            producer_enabled: true,
            consumers: 4,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(PipelineError::InvalidCapacity(self.capacity));
        }
        Ok(())
    }
}

/// Shutdown state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownPhase {
    Running,
    Stopping,
    Drained,
    Reported,
}

/// Pipeline entry point
pub struct Pipeline;

impl Pipeline {
    /// Spawn the producer and consumer workers and return immediately.
    ///
    /// On any spawn failure the already-spawned workers are stopped and
    /// joined before the error is returned, so no partial pool is left
    /// running.
    pub fn start<S>(config: PipelineConfig, source: S) -> Result<PipelineHandle>
    where
        S: WorkItemSource + Send + 'static,
    {
        config.validate()?;

        let queue = Arc::new(BoundedQueue::new(config.capacity)?);
        let stats = Arc::new(Mutex::new(AggregateStats::default()));

        let mut producer: Option<JoinHandle<u64>> = None;
        if config.producer_enabled {
            let worker_queue = Arc::clone(&queue);
            let handle = thread::Builder::new()
                .name("producer-0".into())
                .spawn(move || producer::run(source, worker_queue))
                .map_err(|e| {
                    queue.close();
                    PipelineError::WorkerSpawnFailed {
                        name: "producer-0".into(),
                        source: e,
                    }
                })?;
            producer = Some(handle);
        }

        let mut consumers: Vec<JoinHandle<u64>> = Vec::with_capacity(config.consumers);
        for worker in 0..config.consumers {
            let name = format!("consumer-{worker}");
            let worker_queue = Arc::clone(&queue);
            let worker_stats = Arc::clone(&stats);
            match thread::Builder::new()
                .name(name.clone())
                .spawn(move || consumer::run(worker, worker_queue, worker_stats))
            {
                Ok(handle) => consumers.push(handle),
                Err(e) => {
                    // Unwind the partial pool before surfacing the error.
                    queue.close();
                    if let Some(handle) = producer.take() {
                        let _ = handle.join();
                    }
                    for handle in consumers.drain(..) {
                        let _ = handle.join();
                    }
                    return Err(PipelineError::WorkerSpawnFailed { name, source: e });
                }
            }
        }

        info!(
            capacity = config.capacity,
            consumers = config.consumers,
            producer = config.producer_enabled,
            "pipeline started"
        );

        Ok(PipelineHandle {
            queue,
            stats,
            producer,
            consumers,
            phase: ShutdownPhase::Running,
        })
    }
}

/// Join capability for a running pipeline; single-use.
///
/// `stop` consumes the handle, so the shutdown coordinator cannot be driven
/// twice. Dropping an un-stopped handle runs the same close-and-join
/// sequence without emitting a report.
pub struct PipelineHandle {
    queue: Arc<BoundedQueue<WorkItem>>,
    stats: Arc<Mutex<AggregateStats>>,
    producer: Option<JoinHandle<u64>>,
    consumers: Vec<JoinHandle<u64>>,
    phase: ShutdownPhase,
}

impl PipelineHandle {
    /// Instantaneous queue depth
    pub fn queue_depth(&self) -> usize {
        self.queue.len()
    }

    /// Items consumed so far across the pool.
    ///
    /// May lag by items a consumer has dequeued but not yet recorded; the
    /// report returned by [`stop`](Self::stop) is exact because it is read
    /// after every worker has joined.
    pub fn consumed_so_far(&self) -> u64 {
        self.stats.lock().consumed_count
    }

    /// Whether the producer has terminated (true when none was started)
    pub fn producer_finished(&self) -> bool {
        self.producer
            .as_ref()
            .map(|h| h.is_finished())
            .unwrap_or(true)
    }

    /// Wait until the producer has terminated and the queue is empty.
    ///
    /// Returns false if the timeout elapsed first. Lets a caller with a
    /// finite source drain the pipeline before stopping it. Idle means the
    /// queue is empty, not that every dequeued item has been recorded in
    /// the aggregate yet; use the post-`stop` report for exact totals.
    pub fn wait_until_idle(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.producer_finished() && self.queue.is_empty() {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(10));
        }
    }

    /// Stop the pipeline and block until the final report is emitted.
    ///
    /// Wakes every blocked worker, joins them all, drains residual items,
    /// and only then reads the aggregate totals.
    pub fn stop(mut self) -> PipelineReport {
        self.shutdown()
    }

    fn shutdown(&mut self) -> PipelineReport {
        self.phase = ShutdownPhase::Stopping;
        debug!("stopping pipeline");
        self.queue.close();

        let mut produced = 0u64;
        if let Some(handle) = self.producer.take() {
            match handle.join() {
                Ok(count) => produced = count,
                Err(_) => warn!("producer thread panicked"),
            }
        }
        for handle in self.consumers.drain(..) {
            if handle.join().is_err() {
                warn!("consumer thread panicked");
            }
        }

        self.phase = ShutdownPhase::Drained;
        debug!("all workers joined");

        // Safe now: no worker can touch the queue or the stats.
        let residual = self.queue.drain_for_shutdown();
        let totals = self.stats.lock().clone();

        let report = PipelineReport {
            produced_count: produced,
            consumed_count: totals.consumed_count,
            total_elapsed_nanos: totals.total_elapsed_nanos,
            residual_items: residual.len() as u64,
        };

        info!(
            produced = report.produced_count,
            consumed = report.consumed_count,
            total_elapsed = %report.total_elapsed_hms(),
            residual = report.residual_items,
            "pipeline report"
        );
        self.phase = ShutdownPhase::Reported;
        report
    }
}

impl Drop for PipelineHandle {
    fn drop(&mut self) {
        if self.phase != ShutdownPhase::Reported {
            self.shutdown();
        }
    }
}
