use std::time::{Duration, Instant};

/// Source of monotonic time for the sampler.
///
/// Measurements suspend the calling thread through [`Clock::sleep`], so a
/// test clock can step virtual time instead of waiting.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
pub use manual::{GateClock, ManualClock};

#[cfg(test)]
mod manual {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    use super::Clock;

    /// Virtual clock: `sleep` advances time instantly and is recorded.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<Instant>,
        sleeps: Mutex<Vec<Duration>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
                sleeps: Mutex::new(Vec::new()),
            }
        }

        pub fn advance(&self, duration: Duration) {
            *self.now.lock().unwrap() += duration;
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.lock().unwrap().push(duration);
            self.advance(duration);
        }
    }

    /// Virtual clock whose first `sleep` parks the calling thread: it
    /// signals `parked`, then waits for a message on `release`. Later
    /// sleeps behave like [`ManualClock`].
    #[derive(Debug)]
    pub struct GateClock {
        inner: ManualClock,
        gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
    }

    impl GateClock {
        /// Returns the clock, the `parked` receiver and the `release` sender
        pub fn new() -> (Self, Receiver<()>, Sender<()>) {
            let (parked_tx, parked_rx) = mpsc::channel();
            let (release_tx, release_rx) = mpsc::channel();
            let clock = Self {
                inner: ManualClock::new(),
                gate: Mutex::new(Some((parked_tx, release_rx))),
            };
            (clock, parked_rx, release_tx)
        }
    }

    impl Clock for GateClock {
        fn now(&self) -> Instant {
            self.inner.now()
        }

        fn sleep(&self, duration: Duration) {
            let gate = self.gate.lock().unwrap().take();
            if let Some((parked, release)) = gate {
                parked.send(()).unwrap();
                release.recv().unwrap();
            }
            self.inner.sleep(duration);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_sleep_advances_virtual_time() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.sleep(Duration::from_secs(1));
        clock.advance(Duration::from_millis(250));

        assert_eq!(clock.now() - start, Duration::from_millis(1250));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(1)]);
    }

    #[test]
    fn gate_clock_parks_only_the_first_sleep() {
        let (clock, parked, release) = GateClock::new();
        let clock = std::sync::Arc::new(clock);
        let start = clock.now();

        let sleeper = {
            let clock = clock.clone();
            std::thread::spawn(move || clock.sleep(Duration::from_secs(1)))
        };
        parked.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(clock.now(), start);
        release.send(()).unwrap();
        sleeper.join().unwrap();

        clock.sleep(Duration::from_secs(1));
        assert_eq!(clock.now() - start, Duration::from_secs(2));
    }
}
