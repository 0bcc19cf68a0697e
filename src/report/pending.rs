// Pending-write barrier
//
// Counts in-flight report writes and releases exit callbacks once the
// count returns to zero.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::oneshot;

/// Callback fired once every issued write has completed
pub type ExitCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct PendingState {
    count: usize,
    waiters: Vec<ExitCallback>,
}

/// Shared counter of in-flight writes
#[derive(Clone, Default)]
pub struct PendingWrites {
    state: Arc<Mutex<PendingState>>,
}

impl std::fmt::Debug for PendingWrites {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PendingWrites")
            .field("count", &state.count)
            .field("waiters", &state.waiters.len())
            .finish()
    }
}

impl PendingWrites {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, PendingState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Number of writes issued but not yet completed
    pub fn pending(&self) -> usize {
        self.lock().count
    }

    /// Register a write; the returned guard completes it on drop
    pub fn begin(&self) -> WriteGuard {
        self.lock().count += 1;
        WriteGuard {
            pending: self.clone(),
        }
    }

    fn finish(&self) {
        let ready = {
            let mut state = self.lock();
            state.count = state.count.saturating_sub(1);
            if state.count == 0 {
                std::mem::take(&mut state.waiters)
            } else {
                Vec::new()
            }
        };
        // Callbacks run outside the lock so they may inspect the counter
        for callback in ready {
            callback();
        }
    }

    /// Run `callback` now if idle, otherwise once the count drops to zero
    pub fn on_idle(&self, callback: ExitCallback) {
        let mut state = self.lock();
        if state.count == 0 {
            drop(state);
            callback();
        } else {
            state.waiters.push(callback);
        }
    }

    /// Resolve once no writes are pending
    pub async fn wait_idle(&self) {
        let (tx, rx) = oneshot::channel();
        self.on_idle(Box::new(move || {
            let _ = tx.send(());
        }));
        let _ = rx.await;
    }
}

/// Completion token for one issued write
#[must_use = "dropping the guard marks the write as complete"]
pub struct WriteGuard {
    pending: PendingWrites,
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        self.pending.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(counter: &Arc<AtomicUsize>) -> ExitCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_idle_callback_fires_immediately() {
        let pending = PendingWrites::new();
        let fired = Arc::new(AtomicUsize::new(0));

        pending.on_idle(counting_callback(&fired));

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_callback_waits_for_all_guards() {
        let pending = PendingWrites::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let first = pending.begin();
        let second = pending.begin();
        pending.on_idle(counting_callback(&fired));
        assert_eq!(pending.pending(), 2);

        drop(second);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        drop(first);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(pending.pending(), 0);
    }

    #[test]
    fn test_callback_fires_exactly_once() {
        let pending = PendingWrites::new();
        let fired = Arc::new(AtomicUsize::new(0));

        drop(pending.begin());
        let guard = pending.begin();
        pending.on_idle(counting_callback(&fired));
        drop(guard);
        drop(pending.begin());

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_every_registered_callback_fires() {
        let pending = PendingWrites::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let guard = pending.begin();
        pending.on_idle(counting_callback(&fired));
        pending.on_idle(counting_callback(&fired));
        drop(guard);

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_wait_idle_resolves_after_release() {
        let pending = PendingWrites::new();
        let guard = pending.begin();

        let handle = tokio::spawn({
            let pending = pending.clone();
            async move { pending.wait_idle().await }
        });
        tokio::task::yield_now().await;
        assert!(!handle.is_finished());

        drop(guard);
        handle.await.expect("waiter completes");
        assert_eq!(pending.pending(), 0);
    }
}
