//! The flip semaphore: the one piece of state shared between the producer
//! and the stream engine's completion interrupt.

use core::cell::Cell;
use critical_section::Mutex;

/// Binary semaphore meaning "the engine has released a buffer".
///
/// `release` is the only operation the completion ISR calls — it does no
/// allocation and no logging, matching the interrupt discipline in the
/// concurrency model. `acquire_blocking` spin-polls from the producer side;
/// there is no executor to park on, so busy-waiting inside a
/// `critical_section::free` probe is the correct shape here.
pub struct FlipSemaphore {
    available: Mutex<Cell<bool>>,
}

impl FlipSemaphore {
    /// A fresh semaphore starts available, per the data model.
    #[must_use]
    pub const fn new() -> Self {
        FlipSemaphore {
            available: Mutex::new(Cell::new(true)),
        }
    }

    /// Release the semaphore. Safe to call from interrupt context.
    pub fn release(&self) {
        critical_section::with(|cs| self.available.borrow(cs).set(true));
    }

    /// Try to take the semaphore without blocking. Returns `true` if it was
    /// available and has now been taken.
    pub fn try_acquire(&self) -> bool {
        critical_section::with(|cs| {
            let cell = self.available.borrow(cs);
            if cell.get() {
                cell.set(false);
                true
            } else {
                false
            }
        })
    }

    /// Block until the semaphore becomes available, taking it.
    ///
    /// Bounded in practice by one full ring iteration (the refresh period);
    /// there is no timeout, matching the documented contract that shutdown
    /// must never be called while a waiter is pending.
    pub fn acquire_blocking(&self) {
        while !self.try_acquire() {
            core::hint::spin_loop();
        }
    }
}

impl Default for FlipSemaphore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_available() {
        let sem = FlipSemaphore::new();
        assert!(sem.try_acquire());
    }

    #[test]
    fn test_try_acquire_fails_when_taken() {
        let sem = FlipSemaphore::new();
        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());
    }

    #[test]
    fn test_release_then_acquire() {
        let sem = FlipSemaphore::new();
        assert!(sem.try_acquire());
        assert!(!sem.try_acquire());
        sem.release();
        assert!(sem.try_acquire());
    }

    #[test]
    fn test_acquire_blocking_returns_once_released() {
        let sem = FlipSemaphore::new();
        sem.acquire_blocking();
        sem.release();
        sem.acquire_blocking();
    }
}
