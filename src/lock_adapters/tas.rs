use std::sync::atomic::{AtomicBool, Ordering};

use crate::perf_lock::Locker;

/// Test-and-set: every spin is a compare-exchange on the shared flag.
#[derive(Default)]
pub struct TasLocker {
    locked: AtomicBool,
}

impl TasLocker {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Locker for TasLocker {
    fn lock(&self) {
        while self
            .locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {}
    }

    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}
