use parking_lot::lock_api::RawMutex as _;

use crate::perf_lock::Locker;

type Lock = parking_lot::RawMutex;

/// Parks waiting threads instead of spinning.
pub struct MutexLocker(Lock);

impl MutexLocker {
    pub fn new() -> Self {
        Self(Lock::INIT)
    }
}

impl Default for MutexLocker {
    fn default() -> Self {
        Self::new()
    }
}

impl Locker for MutexLocker {
    fn lock(&self) {
        self.0.lock();
    }

    fn unlock(&self) {
        // SAFETY: `Locker::unlock` is only called by the thread holding the lock.
        unsafe { self.0.unlock() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_is_exclusive() {
        let locker = MutexLocker::new();
        locker.lock();
        assert!(!locker.0.try_lock());
        locker.unlock();
        assert!(locker.0.try_lock());
        locker.unlock();
    }
}
