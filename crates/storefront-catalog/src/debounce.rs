//! Cancelable delayed calls.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Delay applied to free-text search input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Runs only the last of a burst of calls, once `delay` has passed without
/// a newer one.
///
/// Each `call` cancels the pending one. Dropping the debouncer cancels any
/// pending call; `flush` waits for it instead. Must be used inside a tokio runtime.
///
/// # Example
///
/// ```rust,ignore
/// let mut debounce = Debouncer::search_default();
/// let vm = Arc::clone(&vm);
/// debounce.call(move || vm.update_filters(FilterUpdate::new().search(term)));
/// ```
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    /// Create a debouncer with the given delay.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Debouncer with the search input delay.
    pub fn search_default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `f`, replacing any pending call.
    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
    }

    /// Drop the pending call, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Wait for the pending call, if any, to run now rather than be
    /// cancelled. Returns whether a call ran.
    pub async fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) => handle.await.is_ok(),
            None => false,
        }
    }

    /// Whether a call is scheduled and has not yet run.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
