use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// At-most-one-in-flight background request slot.
///
/// Every [`spawn`](Self::spawn) stamps its job with a fresh generation and
/// replaces whatever was pending. [`poll`](Self::poll) only ever surfaces the
/// newest generation's result, so a slow superseded response is explicitly
/// discarded instead of racing the current request for shared state.
pub struct RequestSlot<T> {
    generation: Arc<AtomicU64>,
    pending: Option<(u64, Receiver<T>)>,
}

impl<T: Send + 'static> RequestSlot<T> {
    pub fn new() -> Self {
        Self {
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Run `job` on a worker thread, superseding any pending request.
    pub fn spawn<F>(&mut self, job: F)
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (tx, rx) = mpsc::channel();
        let stamp = Arc::clone(&self.generation);
        thread::spawn(move || {
            let result = job();
            if stamp.load(Ordering::SeqCst) == generation {
                let _ = tx.send(result);
            } else {
                debug!("dropping result of superseded request (generation {generation})");
            }
        });
        self.pending = Some((generation, rx));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Invalidate interest in the pending request, if any.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            self.generation.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Non-blocking. Yields the newest generation's result at most once;
    /// results of superseded or cancelled requests never surface.
    pub fn poll(&mut self) -> Option<T> {
        let (generation, rx) = self.pending.as_ref()?;
        let generation = *generation;
        match rx.try_recv() {
            Ok(value) => {
                self.pending = None;
                if generation == self.generation.load(Ordering::SeqCst) {
                    Some(value)
                } else {
                    None
                }
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                // Worker exited without sending: its generation was stale.
                self.pending = None;
                None
            }
        }
    }
}

impl<T: Send + 'static> Default for RequestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

// tests moved to tests/ module
