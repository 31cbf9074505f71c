use std::time::{Duration, Instant};

/// Wall-clock time of a session.
///
/// `elapsed_time` is only refreshed by `update`, so a paused session simply
/// stops calling it and the displayed value freezes. Resuming picks up the
/// full wall-clock span again, pause included.
#[derive(Debug, Clone)]
pub struct SessionTimer {
    pub start_time: Instant,
    pub elapsed_time: Duration,
}

impl SessionTimer {
    pub fn new(now: Instant) -> Self {
        Self {
            start_time: now,
            elapsed_time: Duration::ZERO,
        }
    }

    pub fn update(&mut self, now: Instant) {
        self.elapsed_time = now.saturating_duration_since(self.start_time);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_time.as_secs_f64()
    }

    /// Whole seconds, rounded down
    pub fn whole_secs(&self) -> u64 {
        self.elapsed_time.as_secs()
    }

    pub fn format_time(&self) -> String {
        format!("{}s", self.whole_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_tracks_now() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(start);
        assert_eq!(timer.elapsed_time, Duration::ZERO);

        timer.update(start + Duration::from_millis(2_750));
        assert_eq!(timer.whole_secs(), 2);
        assert!((timer.elapsed_secs() - 2.75).abs() < 1e-9);
    }

    #[test]
    fn test_value_is_frozen_without_update() {
        let start = Instant::now();
        let mut timer = SessionTimer::new(start);
        timer.update(start + Duration::from_secs(5));

        // No update while paused: nothing moves.
        assert_eq!(timer.whole_secs(), 5);

        timer.update(start + Duration::from_secs(9));
        assert_eq!(timer.whole_secs(), 9);
    }

    #[test]
    fn test_time_formatting() {
        let mut timer = SessionTimer::new(Instant::now());
        timer.elapsed_time = Duration::from_millis(61_900);
        assert_eq!(timer.format_time(), "61s");

        timer.elapsed_time = Duration::ZERO;
        assert_eq!(timer.format_time(), "0s");
    }

    #[test]
    fn test_clock_going_backwards_saturates() {
        let start = Instant::now() + Duration::from_secs(10);
        let mut timer = SessionTimer::new(start);
        timer.update(Instant::now());
        assert_eq!(timer.elapsed_time, Duration::ZERO);
    }
}
