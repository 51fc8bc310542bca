//! Debouncing of rapidly repeated input, such as search keystrokes.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Holds the last submitted value until input has been quiet for `delay`.
///
/// Every [`submit`](Debouncer::submit) restarts the quiet period; only the
/// value present when it runs out becomes the settled value.
#[derive(Debug)]
pub struct Debouncer<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    delay: Duration,
}

impl<T: Clone> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            delay,
        }
    }

    pub fn submit(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// The settled value, promoting the pending one if its quiet period is
    /// over.
    pub fn current(&mut self) -> &T {
        let due = matches!(&self.pending, Some((_, deadline)) if Instant::now() >= *deadline);
        if due {
            self.promote();
        }
        &self.settled
    }

    /// Whether a value is still waiting out its quiet period.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Wait for the pending value, if any, and return the settled value.
    pub async fn settle(&mut self) -> T {
        if let Some((_, deadline)) = &self.pending {
            sleep_until(*deadline).await;
            self.promote();
        }
        self.settled.clone()
    }

    /// Apply the pending value immediately.
    pub fn flush(&mut self) -> &T {
        self.promote();
        &self.settled
    }

    fn promote(&mut self) {
        if let Some((value, _)) = self.pending.take() {
            self.settled = value;
        }
    }
}
