//! Bounded-concurrency batch execution.
//!
//! Bulk operations against many nodes (saving configs, bouncing consoles)
//! run a small fixed number of workers over a shared work queue instead of
//! firing everything at once. Completion order is unspecified; the only
//! contract is that every item is attempted exactly once and the caller
//! gets combined counts back.

use std::future::Future;

use futures::StreamExt;
use tracing::debug;

/// Default worker count for bulk node operations.
pub const DEFAULT_BATCH_WORKERS: usize = 3;

/// Outcome of one batch item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchItemResult {
    /// The operation completed.
    Succeeded,
    /// The operation was intentionally not performed (nothing to do).
    Skipped,
    /// The operation was attempted and failed.
    Failed,
}

/// Combined counts for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Items that completed.
    pub succeeded: usize,
    /// Items that were skipped.
    pub skipped: usize,
    /// Items that failed.
    pub failed: usize,
}

impl BatchOutcome {
    /// Total number of items attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.skipped + self.failed
    }

    /// Records one item result.
    pub fn record(&mut self, result: BatchItemResult) {
        match result {
            BatchItemResult::Succeeded => self.succeeded += 1,
            BatchItemResult::Skipped => self.skipped += 1,
            BatchItemResult::Failed => self.failed += 1,
        }
    }
}

/// Runs `op` over every item with at most `workers` in flight.
///
/// Items are pulled from the queue as workers free up, so a slow item never
/// blocks the rest of the batch — but there is no cross-item ordering
/// guarantee either.
pub async fn run_bounded<I, F, Fut>(items: I, workers: usize, op: F) -> BatchOutcome
where
    I: IntoIterator,
    F: Fn(I::Item) -> Fut,
    Fut: Future<Output = BatchItemResult>,
{
    let workers = workers.max(1);
    let outcome = futures::stream::iter(items)
        .map(op)
        .buffer_unordered(workers)
        .fold(BatchOutcome::default(), |mut outcome, result| async move {
            outcome.record(result);
            outcome
        })
        .await;

    debug!(
        succeeded = outcome.succeeded,
        skipped = outcome.skipped,
        failed = outcome.failed,
        "batch finished"
    );
    outcome
}
