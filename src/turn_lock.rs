//! Busy flag that keeps human input out while the engine is taking a turn.
//!
//! The engine itself is single-threaded; this only serialises the callers
//! that mutate a shared game (an input handler and the computer player).

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct TurnLock {
    busy: AtomicBool,
}

/// Proof that the holder owns the turn. The flag is cleared on drop, so
/// every exit path of the turn releases it.
#[derive(Debug)]
#[must_use = "the turn is released as soon as the guard is dropped"]
pub struct TurnGuard<'a> {
    lock: &'a TurnLock,
}

impl TurnLock {
    pub const fn new() -> Self {
        TurnLock {
            busy: AtomicBool::new(false),
        }
    }

    /// Claim the turn, or `None` if another turn is still in flight.
    pub fn try_acquire(&self) -> Option<TurnGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| TurnGuard { lock: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for TurnGuard<'_> {
    fn drop(&mut self) {
        self.lock.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_single_holder() {
        let lock = TurnLock::new();
        let guard = lock.try_acquire();
        assert!(guard.is_some());
        assert!(lock.is_busy());
        assert!(lock.try_acquire().is_none());

        drop(guard);
        assert!(!lock.is_busy());
        assert!(lock.try_acquire().is_some());
    }

    #[test]
    fn test_released_on_early_return() {
        fn turn(lock: &TurnLock, bail_out: bool) -> Result<(), &'static str> {
            let _guard = lock.try_acquire().ok_or("busy")?;
            if bail_out {
                return Err("no move");
            }
            Ok(())
        }

        let lock = TurnLock::new();
        assert_eq!(turn(&lock, true), Err("no move"));
        assert!(!lock.is_busy());
        assert_eq!(turn(&lock, false), Ok(()));
        assert!(!lock.is_busy());
    }

    #[test]
    fn test_one_winner_across_threads() {
        let lock = Arc::new(TurnLock::new());
        let guard = lock.try_acquire();
        assert!(guard.is_some());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lock = Arc::clone(&lock);
                thread::spawn(move || lock.try_acquire().is_some())
            })
            .collect();
        for handle in handles {
            assert!(!handle.join().expect("thread panicked"));
        }
    }
}
