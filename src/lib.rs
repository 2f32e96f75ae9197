//! Procflow - bounded producer/consumer pipeline over host processes
//!
//! One producer enumerates work items discovered on the host (processes owned
//! by a given UID), publishes them into a capacity-limited FIFO queue, and a
//! pool of consumers drains the queue, computing per-item elapsed time and
//! accumulating aggregate totals. A single-use shutdown coordinator stops the
//! whole pool without losing in-queue items or leaving a thread blocked.
//!
//! # Modules
//!
//! - [`queue`] - Bounded FIFO queue with interruptible blocking operations
//! - [`source`] - Work items and work-item sources (host-process scanner)
//! - [`pipeline`] - Lifecycle, worker loops, shutdown coordination, report
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use procflow::pipeline::{Pipeline, PipelineConfig};
//! use procflow::source::ProcessScanner;
//!
//! let config = PipelineConfig {
//!     capacity: 10,
//!     producer_enabled: true,
//!     consumers: 4,
//! };
//! let handle = Pipeline::start(config, ProcessScanner::new(1000)).unwrap();
//! let report = handle.stop();
//! println!("consumed {} items in {}", report.consumed_count, report.total_elapsed_hms());
//! ```

// Core error handling
pub mod error;

// Shared queue and synchronization
pub mod queue;

// Work-item discovery
pub mod source;

// Workers and lifecycle
pub mod pipeline;

// Command-line interface
pub mod cli;

pub use error::{PipelineError, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::error::{PipelineError, Result};
    pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineHandle, PipelineReport};
    pub use crate::queue::BoundedQueue;
    pub use crate::source::{ProcessScanner, VecSource, WorkItem, WorkItemSource};
}
