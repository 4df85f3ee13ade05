use tracing::debug;

/// Parallelism configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub worker_count: usize,
}

impl ParallelismProfile {
    /// One worker per reported hardware thread.
    pub fn hardware() -> Self {
        Self { worker_count: num_cpus::get().max(1) }
    }

    /// Explicit override if given, hardware concurrency otherwise. Never zero.
    pub fn resolve(workers: Option<usize>) -> Self {
        let profile = match workers {
            Some(n) => Self { worker_count: n.max(1) },
            None => Self::hardware(),
        };
        debug!("[PROFILE] worker_count={}", profile.worker_count);
        profile
    }

    /// Pool size for `chunks` tasks; idle threads beyond the chunk count are not spawned.
    pub fn workers_for(&self, chunks: usize) -> usize {
        self.worker_count.min(chunks).max(1)
    }
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::hardware()
    }
}
