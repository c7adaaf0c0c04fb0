//! Cancellable background requests.
//!
//! A `RequestTask` runs one blocking request on a worker thread and hands the
//! result back through a channel that the UI polls once per frame. Cancelling
//! a task (explicitly, or by dropping it) guarantees its result is never
//! delivered, so replacing an in-flight task with a new one means the newest
//! invocation always wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use crate::error::{RequestError, RequestResult};

/// Shared cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

pub struct RequestTask<T> {
    label: &'static str,
    rx: mpsc::Receiver<RequestResult<T>>,
    token: CancelToken,
}

impl<T: Send + 'static> RequestTask<T> {
    /// Run `work` on a new thread. `notify` fires after a result is sent
    /// (used to wake the UI).
    pub fn spawn<W, N>(label: &'static str, work: W, notify: N) -> Self
    where
        W: FnOnce(&CancelToken) -> RequestResult<T> + Send + 'static,
        N: FnOnce() + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let token = CancelToken::new();
        let worker_token = token.clone();

        log::debug!("Starting {} task", label);
        std::thread::spawn(move || {
            if worker_token.is_cancelled() {
                return;
            }
            let result = work(&worker_token);
            if worker_token.is_cancelled() {
                log::debug!("Discarding result of cancelled {} task", label);
                return;
            }
            if tx.send(result).is_ok() {
                notify();
            }
        });

        Self { label, rx, token }
    }
}

impl<T> RequestTask<T> {
    pub fn cancel(&self) {
        if !self.token.is_cancelled() {
            log::debug!("Cancelling {} task", self.label);
            self.token.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// `None` while the request is in flight. A cancelled task, or one whose
    /// worker exited without answering, yields `Err(Cancelled)`.
    pub fn poll(&self) -> Option<RequestResult<T>> {
        if self.token.is_cancelled() {
            return Some(Err(RequestError::Cancelled));
        }
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                log::warn!("{} task ended without a result", self.label);
                Some(Err(RequestError::Cancelled))
            }
        }
    }
}

impl<T> Drop for RequestTask<T> {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
