//! Frame-rate cap for the animation callback

/// Drops callbacks that arrive faster than the cap interval and carries the
/// remainder so the admitted cadence does not drift.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    interval: f64,
    last: f64,
}

impl FrameLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval: interval_ms,
            last: 0.0,
        }
    }

    /// Returns true when a frame at `timestamp` should run
    pub fn admit(&mut self, timestamp: f64) -> bool {
        let elapsed = timestamp - self.last;
        if elapsed < self.interval {
            return false;
        }
        self.last = timestamp - (elapsed % self.interval);
        true
    }

    /// Restart timing from `timestamp` (after a pause)
    pub fn reset(&mut self, timestamp: f64) {
        self.last = timestamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_early_frames() {
        let mut limiter = FrameLimiter::new(1000.0 / 60.0);
        limiter.reset(0.0);
        assert!(!limiter.admit(8.0));
        assert!(limiter.admit(17.0));
        assert!(!limiter.admit(25.0));
    }

    #[test]
    fn test_carries_remainder() {
        let mut limiter = FrameLimiter::new(10.0);
        limiter.reset(0.0);
        assert!(limiter.admit(13.0));
        // last snapped to 10, so 20 is admitted even though only 7ms passed
        assert!(limiter.admit(20.0));
    }

    #[test]
    fn test_high_refresh_display_capped() {
        // 250 Hz callbacks against a 100 fps cap
        let mut limiter = FrameLimiter::new(10.0);
        limiter.reset(0.0);
        let admitted = (1..=250).filter(|i| limiter.admit(*i as f64 * 4.0)).count();
        assert_eq!(admitted, 100);
    }
}
