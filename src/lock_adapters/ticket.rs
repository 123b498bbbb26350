use std::hint;
use std::sync::atomic::{AtomicU64, Ordering};

use super::backoff::Backoff;
use crate::perf_lock::Locker;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TicketBackoff {
    None,
    /// One yield and pause per check of the serving ticket.
    Short,
    /// Exponential yield and pause until served.
    Exp,
}

/// FIFO lock: each thread draws a ticket and waits until it is served.
pub struct TicketLocker {
    current: AtomicU64,
    next: AtomicU64,
    policy: TicketBackoff,
}

impl TicketLocker {
    pub fn new(policy: TicketBackoff) -> Self {
        Self {
            current: AtomicU64::new(0),
            next: AtomicU64::new(0),
            policy,
        }
    }
}

impl Locker for TicketLocker {
    fn lock(&self) {
        let my_ticket = self.next.fetch_add(1, Ordering::Relaxed);
        let mut backoff = Backoff::with_pause();

        while self.current.load(Ordering::Acquire) != my_ticket {
            match self.policy {
                TicketBackoff::None => hint::spin_loop(),
                TicketBackoff::Short => {
                    backoff.snooze();
                    backoff.ok();
                }
                TicketBackoff::Exp => backoff.snooze(),
            }
        }
    }

    fn unlock(&self) {
        self.current.fetch_add(1, Ordering::Release);
    }
}
