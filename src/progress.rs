//! Progress reporting seam
//!
//! The archiver reports per-batch completion increments through a pluggable
//! [`ProgressSink`]. Sinks are for user-facing feedback only and must never
//! drive control decisions.

/// Which phase of a run an increment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Per-work metadata lookups (detail endpoint)
    Metadata,
    /// Plain-text body downloads
    Download,
}

/// Receiver of per-batch progress increments
///
/// For each phase, the increments passed to
/// [`batch_completed`](ProgressSink::batch_completed) sum to that phase's
/// total item count. Cumulative progress is the sink's responsibility to
/// track.
pub trait ProgressSink: Send + Sync {
    /// Called once per settled batch with the count of items just completed
    fn batch_completed(&self, phase: Phase, completed: usize);
}

/// Progress sink that discards all increments
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressSink for NoOpProgress {
    fn batch_completed(&self, _phase: Phase, _completed: usize) {}
}

/// Progress sink that reports increments through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn batch_completed(&self, phase: Phase, completed: usize) {
        tracing::info!(?phase, completed, "batch completed");
    }
}
