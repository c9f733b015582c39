use std::thread;
use std::time::{Duration, Instant};

/// Check `ready` until it returns true or `timeout` has passed, sleeping
/// `interval` between checks. The condition is always checked at least once.
pub fn poll_until(timeout: Duration, interval: Duration, mut ready: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if ready() {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        thread::sleep(interval.min(deadline - now));
    }
}
