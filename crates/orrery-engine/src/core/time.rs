/// Simulation clock.
/// Converts wall-clock frame timestamps into simulated-day deltas.
///
/// Each tick is clamped to `max_frame_seconds` of wall time so a stalled
/// frame or a suspended tab cannot fling the bodies across their orbits.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Simulated days per real second (>= 0).
    speed: f64,
    paused: bool,
    /// Wall timestamp of the previous tick, in milliseconds.
    last_ms: f64,
    /// Upper bound on the wall time consumed by one tick.
    max_frame_seconds: f64,
    /// Total simulated days since construction.
    elapsed_days: f64,
}

/// Default clamp on wall time per tick.
pub const DEFAULT_MAX_FRAME_SECONDS: f64 = 0.05;

impl SimulationClock {
    /// Create a clock running at `speed` days per second, anchored at `now_ms`.
    pub fn new(speed: f64, now_ms: f64) -> Self {
        let mut clock = Self {
            speed: 0.0,
            paused: false,
            last_ms: now_ms,
            max_frame_seconds: DEFAULT_MAX_FRAME_SECONDS,
            elapsed_days: 0.0,
        };
        clock.set_speed(speed);
        clock
    }

    pub fn with_max_frame_seconds(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds >= 0.0 {
            self.max_frame_seconds = seconds;
        }
        self
    }

    /// Advance to `now_ms`. Returns the simulated days elapsed this tick:
    /// 0 while paused, otherwise the clamped wall delta times the speed.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let raw_seconds = (now_ms - self.last_ms) / 1000.0;
        self.last_ms = now_ms;

        // A clock running backwards (or garbage input) contributes nothing.
        let seconds = if raw_seconds.is_finite() {
            raw_seconds.clamp(0.0, self.max_frame_seconds)
        } else {
            0.0
        };
        if raw_seconds > self.max_frame_seconds {
            log::trace!("clock: clamped {:.3}s frame to {:.3}s", raw_seconds, seconds);
        }

        if self.paused {
            return 0.0;
        }
        let delta_days = seconds * self.speed;
        self.elapsed_days += delta_days;
        delta_days
    }

    /// Set the rate in days per second. Negative rates clamp to 0;
    /// non-finite rates are ignored.
    pub fn set_speed(&mut self, days_per_second: f64) {
        if !days_per_second.is_finite() {
            log::warn!("clock: ignoring non-finite speed {}", days_per_second);
            return;
        }
        self.speed = days_per_second.max(0.0);
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn max_frame_seconds(&self) -> f64 {
        self.max_frame_seconds
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_ms_ticks() {
        let mut clock = SimulationClock::new(1.0, 0.0);
        let d1 = clock.tick(16.0);
        let d2 = clock.tick(32.0);
        assert!((d1 - 0.016).abs() < 1e-12, "d1 = {d1}");
        assert!((d2 - 0.016).abs() < 1e-12, "d2 = {d2}");
    }

    #[test]
    fn thousand_ticks_sum_to_sixteen_days() {
        let mut clock = SimulationClock::new(1.0, 0.0);
        let mut total = 0.0;
        for i in 1..=1000 {
            total += clock.tick(i as f64 * 16.0);
        }
        assert!((total - 16.0).abs() < 1e-9, "total = {total}");
        assert!((clock.elapsed_days() - total).abs() < 1e-12);
    }

    #[test]
    fn paused_returns_zero_for_any_gap() {
        let mut clock = SimulationClock::new(50.0, 0.0);
        clock.set_paused(true);
        assert_eq!(clock.tick(16.0), 0.0);
        assert_eq!(clock.tick(1.0e9), 0.0);
        assert_eq!(clock.elapsed_days(), 0.0);
    }

    #[test]
    fn large_gap_is_clamped() {
        let mut clock = SimulationClock::new(10.0, 0.0);
        let d = clock.tick(60_000.0);
        assert!((d - 0.05 * 10.0).abs() < 1e-12, "d = {d}");
        // The anchor still moves, so the next frame is normal again.
        let d = clock.tick(60_016.0);
        assert!((d - 0.16).abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn backwards_time_is_zero() {
        let mut clock = SimulationClock::new(1.0, 1000.0);
        assert_eq!(clock.tick(500.0), 0.0);
    }

    #[test]
    fn speed_change_applies_next_tick() {
        let mut clock = SimulationClock::new(1.0, 0.0);
        clock.tick(10.0);
        clock.set_speed(100.0);
        let d = clock.tick(20.0);
        assert!((d - 1.0).abs() < 1e-9, "d = {d}");
    }

    #[test]
    fn negative_speed_clamps_and_nan_is_ignored() {
        let mut clock = SimulationClock::new(2.0, 0.0);
        clock.set_speed(f64::NAN);
        assert_eq!(clock.speed(), 2.0);
        clock.set_speed(-3.0);
        assert_eq!(clock.speed(), 0.0);
    }

    #[test]
    fn toggle_pause_flips() {
        let mut clock = SimulationClock::new(1.0, 0.0);
        assert!(clock.toggle_pause());
        assert!(!clock.toggle_pause());
    }
}
