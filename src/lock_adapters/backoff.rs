use std::hint;
use std::thread;

const MAX_YIELDS: u64 = 1 << 10;

/// Exponential backoff: each call yields the current quantity of times and
/// then doubles it. `ok` starts over from a single yield.
#[derive(Debug)]
pub struct Backoff {
    yield_quantity: u64,
    pause: bool,
}

impl Backoff {
    pub fn new() -> Self {
        Self {
            yield_quantity: 1,
            pause: false,
        }
    }

    /// Also issues a spin-loop hint after every yield.
    pub fn with_pause() -> Self {
        Self {
            yield_quantity: 1,
            pause: true,
        }
    }

    pub fn snooze(&mut self) {
        for _ in 0..self.yield_quantity {
            thread::yield_now();
            if self.pause {
                hint::spin_loop();
            }
        }
        self.yield_quantity = (self.yield_quantity * 2).min(MAX_YIELDS);
    }

    pub fn ok(&mut self) {
        self.yield_quantity = 1;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doubles_until_capped() {
        let mut backoff = Backoff::new();
        assert_eq!(backoff.yield_quantity, 1);
        backoff.snooze();
        assert_eq!(backoff.yield_quantity, 2);
        backoff.snooze();
        assert_eq!(backoff.yield_quantity, 4);

        for _ in 0..20 {
            backoff.snooze();
        }
        assert_eq!(backoff.yield_quantity, MAX_YIELDS);
    }

    #[test]
    fn ok_resets() {
        let mut backoff = Backoff::with_pause();
        backoff.snooze();
        backoff.snooze();
        backoff.ok();
        assert_eq!(backoff.yield_quantity, 1);
    }
}
