use std::time::{Duration, Instant};

/// A single-shot simulated delay carrying its eventual value. The value is
/// fixed when the delay is armed and handed over the first time the owner
/// polls at or past the deadline. Dropping a pending delay cancels it, so a
/// torn-down screen never sees a late completion.
#[derive(Debug)]
pub struct Deferred<T> {
    ready_at: Instant,
    value: Option<T>,
}

impl<T> Deferred<T> {
    pub fn new(value: T, delay: Duration, now: Instant) -> Self {
        Self {
            ready_at: now + delay,
            value: Some(value),
        }
    }

    pub fn is_ready(&self, now: Instant) -> bool {
        now >= self.ready_at
    }

    /// The value, once the deadline has passed. None while still pending or
    /// after it was already taken.
    pub fn take_if_ready(&mut self, now: Instant) -> Option<T> {
        if now >= self.ready_at {
            self.value.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_until_the_deadline() {
        let start = Instant::now();
        let mut deferred = Deferred::new("done", Duration::from_millis(100), start);

        assert!(!deferred.is_ready(start));
        assert_eq!(deferred.take_if_ready(start), None);
        assert_eq!(
            deferred.take_if_ready(start + Duration::from_millis(99)),
            None
        );
        assert_eq!(
            deferred.take_if_ready(start + Duration::from_millis(100)),
            Some("done")
        );
    }

    #[test]
    fn delivers_exactly_once() {
        let start = Instant::now();
        let mut deferred = Deferred::new(1, Duration::ZERO, start);

        assert_eq!(deferred.take_if_ready(start), Some(1));
        assert_eq!(deferred.take_if_ready(start), None);
    }
}
