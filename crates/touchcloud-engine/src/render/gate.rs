use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Upper bound on how long a waiter sleeps before re-checking the counter.
///
/// `release` never takes the lock, so a wakeup can race a waiter that is about
/// to sleep; the re-check bounds the cost of that race.
const RECHECK_INTERVAL: Duration = Duration::from_millis(1);

/// Counting gate bounding the number of frames in flight.
///
/// The render thread acquires a permit before encoding a frame and hands it to
/// the GPU completion callback. Dropping the permit (on any thread) releases
/// the slot with a single atomic decrement plus a notify.
#[derive(Debug)]
pub struct FrameGate {
    capacity: usize,
    in_flight: AtomicUsize,
    lock: Mutex<()>,
    signal: Condvar,
}

/// One acquired in-flight slot. Released on drop.
#[derive(Debug)]
pub struct FramePermit {
    gate: Arc<FrameGate>,
}

impl FrameGate {
    /// Creates a gate admitting at most `capacity` concurrent permits.
    ///
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Arc<Self> {
        Arc::new(Self {
            capacity: capacity.max(1),
            in_flight: AtomicUsize::new(0),
            lock: Mutex::new(()),
            signal: Condvar::new(),
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of permits currently held.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Takes a permit if one is free, without blocking.
    pub fn try_acquire(self: &Arc<Self>) -> Option<FramePermit> {
        self.try_take().then(|| FramePermit { gate: Arc::clone(self) })
    }

    /// Blocks until a permit is free.
    pub fn acquire(self: &Arc<Self>) -> FramePermit {
        if let Some(permit) = self.try_acquire() {
            return permit;
        }

        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(permit) = self.try_acquire() {
                return permit;
            }
            guard = self
                .signal
                .wait_timeout(guard, RECHECK_INTERVAL)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// Blocks for at most `timeout` waiting for a permit.
    pub fn acquire_timeout(self: &Arc<Self>, timeout: Duration) -> Option<FramePermit> {
        if let Some(permit) = self.try_acquire() {
            return Some(permit);
        }

        let deadline = Instant::now() + timeout;
        let mut guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(permit) = self.try_acquire() {
                return Some(permit);
            }
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            let wait = (deadline - now).min(RECHECK_INTERVAL);
            guard = self
                .signal
                .wait_timeout(guard, wait)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    fn try_take(&self) -> bool {
        let mut current = self.in_flight.load(Ordering::Acquire);
        loop {
            if current >= self.capacity {
                return false;
            }
            match self.in_flight.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self) {
        let prev = self.in_flight.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "frame gate released more often than acquired");
        self.signal.notify_one();
    }
}

impl Drop for FramePermit {
    fn drop(&mut self) {
        self.gate.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn admits_up_to_capacity() {
        let gate = FrameGate::new(3);
        let permits: Vec<_> = (0..3).map(|_| gate.try_acquire().unwrap()).collect();
        assert_eq!(gate.in_flight(), 3);
        assert!(gate.try_acquire().is_none());
        drop(permits);
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let gate = FrameGate::new(0);
        assert_eq!(gate.capacity(), 1);
        let _p = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());
    }

    #[test]
    fn acquire_timeout_expires_when_full() {
        let gate = FrameGate::new(1);
        let _held = gate.acquire();
        let start = Instant::now();
        assert!(gate.acquire_timeout(Duration::from_millis(20)).is_none());
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn extra_acquire_blocks_until_a_permit_is_released_elsewhere() {
        let gate = FrameGate::new(3);
        let held: Vec<_> = (0..3).map(|_| gate.acquire()).collect();

        let (tx, rx) = mpsc::channel();
        let waiter = {
            let gate = Arc::clone(&gate);
            thread::spawn(move || {
                let permit = gate.acquire();
                tx.send(()).unwrap();
                drop(permit);
            })
        };

        // Fourth acquisition must still be blocked.
        assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());

        // Release from another thread, as a GPU completion callback would.
        let mut held = held;
        let first = held.remove(0);
        thread::spawn(move || drop(first)).join().unwrap();

        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        waiter.join().unwrap();
        drop(held);
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn concurrent_holders_never_exceed_capacity() {
        let gate = FrameGate::new(3);
        let peak = Arc::new(AtomicUsize::new(0));

        let workers: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let peak = Arc::clone(&peak);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let _permit = gate.acquire();
                        peak.fetch_max(gate.in_flight(), Ordering::AcqRel);
                        thread::yield_now();
                    }
                })
            })
            .collect();

        for w in workers {
            w.join().unwrap();
        }
        assert!(peak.load(Ordering::Acquire) <= 3);
        assert_eq!(gate.in_flight(), 0);
    }
}
