//! Fixed-size worker pool draining a FIFO task queue.
//!
//! The queue is a crossbeam channel; the pool's stop state is the presence
//! of the sender. Workers exit only once the queue is both closed and empty,
//! so `shutdown()` drains every task enqueued before it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, error, warn};

use crate::types::StreamError;

/// Unit of work executed by exactly one worker.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Debug, Default)]
struct PoolCounters {
    executed: AtomicU64,
    panicked: AtomicU64,
}

/// Point-in-time view of the pool's task counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Tasks that ran to completion.
    pub executed: u64,
    /// Tasks that panicked and were contained.
    pub panicked: u64,
}

pub struct WorkerPool {
    sender: Mutex<Option<Sender<Task>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    counters: Arc<PoolCounters>,
    size: usize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Tasks never run under these locks, so a poisoned guard still holds consistent data.
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

fn run_worker(index: usize, rx: Receiver<Task>, counters: Arc<PoolCounters>) {
    debug!("[WORKER-{index}] starting");

    // recv() fails only once the sender is gone and the queue is empty
    while let Ok(task) = rx.recv() {
        match panic::catch_unwind(AssertUnwindSafe(task)) {
            Ok(()) => {
                counters.executed.fetch_add(1, Ordering::Relaxed);
            }
            Err(payload) => {
                counters.panicked.fetch_add(1, Ordering::Relaxed);
                error!("[WORKER-{index}] task panicked: {}", panic_message(payload.as_ref()));
            }
        }
    }

    debug!("[WORKER-{index}] finished");
}

impl WorkerPool {
    /// Spawn `size` persistent workers.
    pub fn new(size: usize) -> Result<Self, StreamError> {
        if size == 0 {
            return Err(StreamError::Validation("worker pool size must be at least 1".into()));
        }

        let (tx, rx) = unbounded::<Task>();
        let counters = Arc::new(PoolCounters::default());
        let mut workers = Vec::with_capacity(size);

        for i in 0..size {
            let rx = rx.clone();
            let counters = counters.clone();
            let spawned = thread::Builder::new()
                .name(format!("chunkpress-worker-{i}"))
                .spawn(move || run_worker(i, rx, counters));

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(e) => {
                    // Release the ones already running before bailing out.
                    drop(tx);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(StreamError::Io(e));
                }
            }
        }

        debug!("[POOL] started {size} workers");
        Ok(Self {
            sender: Mutex::new(Some(tx)),
            workers: Mutex::new(workers),
            counters,
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Queue a task and wake one idle worker.
    ///
    /// Returns `false` and drops the task if shutdown has already begun.
    pub fn enqueue<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        let guard = lock(&self.sender);
        let Some(tx) = guard.as_ref() else {
            warn!("[POOL] enqueue after shutdown, task dropped");
            return false;
        };
        if tx.send(Box::new(task)).is_err() {
            warn!("[POOL] all workers gone, task dropped");
            return false;
        }
        true
    }

    /// Whether `shutdown()` has been called.
    pub fn is_shut_down(&self) -> bool {
        lock(&self.sender).is_none()
    }

    /// Close the queue, let workers drain it, and join them all.
    ///
    /// Idempotent. Concurrent callers block until the first one has joined every worker.
    pub fn shutdown(&self) {
        let sender = lock(&self.sender).take();
        if sender.is_some() {
            debug!("[POOL] shutdown requested, draining queue");
        }
        drop(sender);

        let mut workers = lock(&self.workers);
        for handle in workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                error!("[POOL] {name} exited abnormally");
            }
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            executed: self.counters.executed.load(Ordering::Relaxed),
            panicked: self.counters.panicked.load(Ordering::Relaxed),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
