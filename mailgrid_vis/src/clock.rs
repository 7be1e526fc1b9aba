//! Virtual clock implementing MailGridContext for deterministic replay.

use async_trait::async_trait;
use mailgrid_env::MailGridContext;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A manually advanced clock.
///
/// `sleep` advances the clock instead of suspending, so a replay driven
/// by this context finishes immediately while still observing the same
/// deadlines a real clock would. Clones share the underlying time.
pub struct VirtualClock {
    /// Current virtual time (nanoseconds since clock creation)
    time_ns: Arc<Mutex<u64>>,
}

impl VirtualClock {
    /// Creates a new clock at time zero.
    pub fn new() -> Self {
        Self {
            time_ns: Arc::new(Mutex::new(0)),
        }
    }

    /// Advances the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.time_ns.lock().unwrap();
        *time += duration.as_nanos() as u64;
    }

    /// Returns the current virtual time in nanoseconds.
    pub fn time_ns(&self) -> u64 {
        *self.time_ns.lock().unwrap()
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for VirtualClock {
    fn clone(&self) -> Self {
        Self {
            time_ns: Arc::clone(&self.time_ns),
        }
    }
}

#[async_trait]
impl MailGridContext for VirtualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(*self.time_ns.lock().unwrap())
    }

    async fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_clock_advances() {
        let clock = VirtualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));

        clock.advance(Duration::from_millis(500));
        assert_eq!(clock.now(), Duration::from_millis(1500));
    }

    #[tokio::test]
    async fn test_sleep_advances_instead_of_blocking() {
        let clock = VirtualClock::new();
        clock.sleep(Duration::from_secs(3600)).await;
        assert_eq!(clock.now(), Duration::from_secs(3600));
    }

    #[test]
    fn test_clone_shares_time() {
        let clock1 = VirtualClock::new();
        let clock2 = clock1.clone();

        clock1.advance(Duration::from_secs(5));
        assert_eq!(clock1.now(), clock2.now());
    }
}
