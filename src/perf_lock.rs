use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Barrier,
};
use std::thread;
use std::time::Instant;

use tracing::{debug, info};

use crate::error::{BenchError, Result};
use crate::perf::Measurement;

/// A lock that can be benchmarked.
///
/// `lock` must not return while another thread holds the lock; `unlock` is
/// only called by the thread that holds it.
pub trait Locker: Send + Sync + 'static {
    fn lock(&self);
    fn unlock(&self);

    /// Runs `f` while holding the lock. The lock is released even if `f`
    /// panics.
    fn with_lock<R>(&self, f: impl FnOnce() -> R) -> R
    where
        Self: Sized,
    {
        self.lock();
        let _unlock = scopeguard::guard((), |_| self.unlock());
        f()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub thread_count: usize,
    pub increments_per_thread: usize,
}

impl RunConfig {
    /// Each of `thread_count` threads performs `increments_per_thread`
    /// increments. The total must fit the shared counter.
    pub fn new(thread_count: usize, increments_per_thread: usize) -> Result<Self> {
        if thread_count == 0 {
            return Err(BenchError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }

        let config = Self {
            thread_count,
            increments_per_thread,
        };
        config.total_increments()?;
        Ok(config)
    }

    /// Splits `total_increments` evenly over `thread_count` threads.
    pub fn split(thread_count: usize, total_increments: usize) -> Result<Self> {
        if thread_count == 0 {
            return Err(BenchError::InvalidConfig(
                "thread count must be at least 1".to_string(),
            ));
        }

        Self::new(thread_count, total_increments / thread_count)
    }

    /// Thread counts `1, step, 2 * step, ...` up to `max_threads`, each
    /// sharing the same total amount of work.
    pub fn sweep(max_threads: usize, step: usize, total_increments: usize) -> Result<Vec<Self>> {
        if max_threads == 0 {
            return Err(BenchError::InvalidConfig(
                "max threads must be at least 1".to_string(),
            ));
        }
        if step == 0 {
            return Err(BenchError::InvalidConfig(
                "thread step must be at least 1".to_string(),
            ));
        }

        std::iter::once(1)
            .chain((step..=max_threads).step_by(step).filter(|&n| n != 1))
            .map(|thread_count| Self::split(thread_count, total_increments))
            .collect()
    }

    pub fn total_increments(&self) -> Result<u64> {
        self.thread_count
            .checked_mul(self.increments_per_thread)
            .and_then(|total| u64::try_from(total).ok())
            .ok_or_else(|| {
                BenchError::InvalidConfig(format!(
                    "{} threads x {} increments overflows the counter",
                    self.thread_count, self.increments_per_thread
                ))
            })
    }
}

fn run_increments<L: Locker>(locker: &L, counter: &AtomicU64, increments: usize) {
    for _ in 0..increments {
        locker.with_lock(|| {
            // A separate load and store, so concurrent holders lose updates.
            let value = counter.load(Ordering::Relaxed);
            counter.store(value + 1, Ordering::Relaxed);
        });
    }
}

/// Has every thread increment a shared counter under `locker` and reports
/// the wall time from the moment all threads are released until the last one
/// is done.
pub fn run_workload<L: Locker>(
    name: &'static str,
    locker: Arc<L>,
    config: &RunConfig,
) -> Result<Measurement> {
    let num_threads = config.thread_count;
    let expected = config.total_increments()?;
    debug!(
        lock = name,
        threads = num_threads,
        increments = config.increments_per_thread,
        "starting workload"
    );

    let counter = Arc::new(AtomicU64::new(0));
    let barrier = Arc::new(Barrier::new(num_threads + 1));
    let mut thread_handles = Vec::with_capacity(num_threads);

    for _ in 0..num_threads {
        let increments = config.increments_per_thread;
        let barrier = barrier.clone();
        let counter = counter.clone();
        let locker = locker.clone();

        let handle = thread::spawn(move || {
            // The run ends when every thread has passed the second wait.
            let workload_scope = scopeguard::guard(barrier, |barrier| {
                barrier.wait();
            });
            workload_scope.wait();
            run_increments(&*locker, &counter, increments);
        });

        thread_handles.push(handle);
    }

    barrier.wait();
    let start = Instant::now();
    barrier.wait();
    let spent = start.elapsed();

    for handle in thread_handles {
        handle
            .join()
            .map_err(|_| BenchError::WorkerPanicked { name })?;
    }

    let actual = counter.load(Ordering::Acquire);
    if actual != expected {
        return Err(BenchError::LostUpdates {
            name,
            expected,
            actual,
        });
    }

    let elapsed_ms = spent.as_millis() as u64;
    info!("Lock {name:22} (threads {num_threads:>3}) ... {elapsed_ms:>6} ms");

    Ok(Measurement {
        name,
        thread_count: num_threads as u64,
        elapsed_ms,
    })
}
