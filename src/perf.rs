use serde::{Deserialize, Serialize};

pub const MUTEX_LABEL: &str = "mutex";
pub const TTAS_LABEL: &str = "TTAS";
pub const BEST_SPIN_LABEL: &str = "best spin";

/// One timed run of a lock at a given thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Measurement {
    pub name: &'static str,
    pub thread_count: u64,
    pub elapsed_ms: u64,
}

/// One row of the lock comparison table: a thread count and the time taken
/// by the mutex, TTAS and best spin locks at that thread count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkSample {
    pub thread_count: u64,
    pub mutex_ms: u64,
    pub ttas_ms: u64,
    pub best_spin_ms: u64,
}

impl BenchmarkSample {
    /// Builds one sample per thread count that has a measurement for all
    /// three compared locks. Thread counts keep their first-seen order.
    pub fn collect(measurements: &[Measurement]) -> Vec<BenchmarkSample> {
        let mut thread_counts: Vec<u64> = Vec::new();
        for m in measurements {
            if !thread_counts.contains(&m.thread_count) {
                thread_counts.push(m.thread_count);
            }
        }

        let find = |name: &str, thread_count: u64| {
            measurements
                .iter()
                .find(|m| m.name == name && m.thread_count == thread_count)
                .map(|m| m.elapsed_ms)
        };

        thread_counts
            .into_iter()
            .filter_map(|thread_count| {
                Some(BenchmarkSample {
                    thread_count,
                    mutex_ms: find(MUTEX_LABEL, thread_count)?,
                    ttas_ms: find(TTAS_LABEL, thread_count)?,
                    best_spin_ms: find(BEST_SPIN_LABEL, thread_count)?,
                })
            })
            .collect()
    }
}

/// The sample table split into one sequence per column. Index `i` of every
/// column belongs to sample `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    pub thread_count: Vec<u64>,
    pub mutex_ms: Vec<u64>,
    pub ttas_ms: Vec<u64>,
    pub best_spin_ms: Vec<u64>,
}

impl Columns {
    pub fn extract(samples: &[BenchmarkSample]) -> Self {
        Self {
            thread_count: samples.iter().map(|s| s.thread_count).collect(),
            mutex_ms: samples.iter().map(|s| s.mutex_ms).collect(),
            ttas_ms: samples.iter().map(|s| s.ttas_ms).collect(),
            best_spin_ms: samples.iter().map(|s| s.best_spin_ms).collect(),
        }
    }

    /// The y-columns paired with their legend labels, in drawing order.
    pub fn labelled_series(&self) -> [(&'static str, &[u64]); 3] {
        [
            (TTAS_LABEL, self.ttas_ms.as_slice()),
            (MUTEX_LABEL, self.mutex_ms.as_slice()),
            (BEST_SPIN_LABEL, self.best_spin_ms.as_slice()),
        ]
    }
}
