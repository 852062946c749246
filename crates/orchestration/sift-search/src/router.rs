//! Round-robin distribution of work to the worker pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tracing::trace;

/// Distributes work items to a fixed pool of workers.
///
/// Each worker owns a bounded channel, so routing waits while the chosen
/// worker's buffer is full. Dropping the router closes every channel, which
/// lets workers drain their buffers and exit.
pub struct WorkRouter<T> {
    senders: Vec<mpsc::Sender<T>>,
    next_worker: AtomicUsize,
}

impl<T> WorkRouter<T> {
    /// Create a router with `num_workers` channels of `buffer_size` slots each.
    pub fn new(num_workers: usize, buffer_size: usize) -> (Self, Vec<mpsc::Receiver<T>>) {
        let mut senders = Vec::with_capacity(num_workers);
        let mut receivers = Vec::with_capacity(num_workers);

        for _ in 0..num_workers {
            let (tx, rx) = mpsc::channel(buffer_size);
            senders.push(tx);
            receivers.push(rx);
        }

        let router = Self {
            senders,
            next_worker: AtomicUsize::new(0),
        };

        (router, receivers)
    }

    /// Route an item to the next worker.
    ///
    /// Returns the item back if that worker's channel is closed, which
    /// happens once the worker has stopped on an error.
    pub async fn route(&self, item: T) -> Result<(), T> {
        let worker_idx = self.next_worker.fetch_add(1, Ordering::Relaxed) % self.senders.len();
        trace!(worker = worker_idx, "Routing item to worker");

        self.senders[worker_idx].send(item).await.map_err(|e| e.0)
    }

    pub fn num_workers(&self) -> usize {
        self.senders.len()
    }
}
