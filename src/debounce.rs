use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

/// Default idle period before a debounced task runs
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs only the last of a burst of scheduled tasks.
///
/// Each [`schedule`](Debouncer::schedule) aborts the pending timer and
/// starts a new one. Once the timer fires the task is detached, so a later
/// call never cancels work that has already started.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, pending: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending run with `task`, due after the idle period.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        }));
    }

    /// Drop the pending run, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                debug!("Cancelling pending debounced task");
            }
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
