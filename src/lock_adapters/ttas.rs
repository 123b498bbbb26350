use std::hint;
use std::sync::atomic::{AtomicBool, Ordering};

use super::backoff::Backoff;
use crate::perf_lock::Locker;

/// What a TTAS waiter does while it sees the lock taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TtasBackoff {
    /// Spin on the load.
    None,
    /// Yield once per busy observation.
    Short,
    /// Back off exponentially, starting over after every lost
    /// compare-exchange.
    ShortExp,
    /// Back off exponentially until the lock is acquired.
    LongExp,
}

/// Test-and-test-and-set: waiters spin reading the flag and only attempt the
/// compare-exchange once they have seen it clear.
pub struct TtasLocker {
    locked: AtomicBool,
    policy: TtasBackoff,
}

impl TtasLocker {
    pub fn new(policy: TtasBackoff) -> Self {
        Self {
            locked: AtomicBool::new(false),
            policy,
        }
    }
}

impl Locker for TtasLocker {
    fn lock(&self) {
        let mut backoff = Backoff::new();
        loop {
            while self.locked.load(Ordering::Acquire) {
                match self.policy {
                    TtasBackoff::None => hint::spin_loop(),
                    TtasBackoff::Short => {
                        backoff.snooze();
                        backoff.ok();
                    }
                    TtasBackoff::ShortExp | TtasBackoff::LongExp => backoff.snooze(),
                }
            }

            if self
                .locked
                .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
                .is_ok()
            {
                return;
            }

            if self.policy == TtasBackoff::ShortExp {
                backoff.ok();
            }
        }
    }

    fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn waiter_blocks_until_unlock() {
        let locker = Arc::new(TtasLocker::new(TtasBackoff::ShortExp));
        locker.lock();

        let waiter = {
            let locker = locker.clone();
            thread::spawn(move || {
                locker.lock();
                locker.unlock();
            })
        };

        thread::sleep(Duration::from_millis(20));
        assert!(!waiter.is_finished());

        locker.unlock();
        waiter.join().unwrap();
        assert!(!locker.locked.load(Ordering::Relaxed));
    }
}
