//! Aggregate Statistics
//!
//! Totals accumulated by the consumer pool and the final report emitted by
//! the shutdown coordinator.

use serde::Serialize;

/// Running totals over every consumed item.
///
/// Mutated only under the pipeline's stats lock so the two fields are always
/// updated together; read unguarded only after every worker has joined.
#[derive(Debug, Clone, Default)]
pub struct AggregateStats {
    /// Number of items consumed across the whole pool
    pub consumed_count: u64,
    /// Sum of per-item elapsed times in nanoseconds
    pub total_elapsed_nanos: u64,
}

impl AggregateStats {
    /// Record one consumed item with its elapsed time
    pub fn record(&mut self, elapsed_ns: u64) {
        self.consumed_count += 1;
        self.total_elapsed_nanos = self.total_elapsed_nanos.saturating_add(elapsed_ns);
    }
}

/// Final report produced once the pipeline has fully stopped
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Items published by the producer before it terminated
    pub produced_count: u64,
    /// Items consumed across the whole pool
    pub consumed_count: u64,
    /// Sum of per-item elapsed times in nanoseconds
    pub total_elapsed_nanos: u64,
    /// Items still resident in the queue when the workers stopped
    pub residual_items: u64,
}

impl PipelineReport {
    /// Total elapsed time formatted as `H:MM:SS`
    pub fn total_elapsed_hms(&self) -> String {
        format_hms(self.total_elapsed_nanos)
    }
}

/// Format a nanosecond duration as `H:MM:SS` (hours are not capped)
pub fn format_hms(nanos: u64) -> String {
    let total_secs = nanos / 1_000_000_000;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(0), "0:00:00");
        assert_eq!(format_hms(999_999_999), "0:00:00");
        assert_eq!(format_hms(61 * 1_000_000_000), "0:01:01");
        assert_eq!(format_hms(3_661 * 1_000_000_000), "1:01:01");
        assert_eq!(format_hms(90_000 * 1_000_000_000), "25:00:00");
    }

    #[test]
    fn test_record_updates_both_fields_together() {
        let mut stats = AggregateStats::default();
        stats.record(500);
        stats.record(1_500);
        assert_eq!(stats.consumed_count, 2);
        assert_eq!(stats.total_elapsed_nanos, 2_000);
    }

    #[test]
    fn test_record_saturates_instead_of_overflowing() {
        let mut stats = AggregateStats {
            consumed_count: 0,
            total_elapsed_nanos: u64::MAX - 10,
        };
        stats.record(100);
        assert_eq!(stats.total_elapsed_nanos, u64::MAX);
    }
}
