use std::time::{Duration, Instant};

/// Fixed-timestep clock driving the wheel animation.
///
/// Elapsed wall time goes into an accumulator; every whole `interval` in it
/// becomes one tick. The remainder carries over to the next call.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    interval: Duration,
    accumulator: Duration,
    /// Upper bound on the elapsed time accepted in one call, so a stalled
    /// event loop does not produce a burst of catch-up ticks.
    max_step: Duration,
}

impl AnimationClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            accumulator: Duration::ZERO,
            max_step: Duration::from_millis(100),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Feed elapsed wall time; returns the number of ticks that became due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(self.max_step);
        let mut ticks = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        if ticks > 1 {
            tracing::trace!("clock caught up {ticks} ticks");
        }
        ticks
    }

    /// Time remaining until the next tick is due.
    pub fn until_next_tick(&self) -> Duration {
        self.interval.saturating_sub(self.accumulator)
    }

    /// Instant at which the next tick is due, measured from `now`.
    pub fn next_deadline(&self, now: Instant) -> Instant {
        now + self.until_next_tick()
    }

    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(Duration::from_millis(16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn whole_intervals_become_ticks() {
        let mut clock = AnimationClock::new(ms(16));
        assert_eq!(clock.advance(ms(15)), 0);
        assert_eq!(clock.advance(ms(1)), 1);
        assert_eq!(clock.advance(ms(48)), 3);
    }

    #[test]
    fn remainder_carries_over() {
        let mut clock = AnimationClock::new(ms(16));
        assert_eq!(clock.advance(ms(20)), 1);
        assert_eq!(clock.until_next_tick(), ms(12));
        assert_eq!(clock.advance(ms(12)), 1);
        assert_eq!(clock.until_next_tick(), ms(16));
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut clock = AnimationClock::new(ms(16));
        // 100 ms cap -> 6 ticks, 4 ms left over
        assert_eq!(clock.advance(Duration::from_secs(5)), 6);
        assert_eq!(clock.until_next_tick(), ms(12));
    }

    #[test]
    fn deadline_is_in_the_future() {
        let clock = AnimationClock::default();
        let now = Instant::now();
        assert_eq!(clock.next_deadline(now), now + ms(16));
    }

    #[test]
    fn zero_interval_is_raised() {
        let mut clock = AnimationClock::new(Duration::ZERO);
        assert_eq!(clock.interval(), ms(1));
        assert_eq!(clock.advance(ms(3)), 3);
        clock.reset();
        assert_eq!(clock.until_next_tick(), ms(1));
    }
}
