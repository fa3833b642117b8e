// extensions/pulse.rs
//
// Selection pulse: a short scale bump on the picked body.

use crate::api::types::BodyId;
use super::easing::{Easing, lerp};

pub const DEFAULT_PULSE_PEAK: f64 = 1.06;
pub const DEFAULT_PULSE_MS: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bump {
    body: BodyId,
    start_ms: f64,
}

/// Scales one body up to `peak` and back to 1 over `duration_ms`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPulse {
    peak: f64,
    duration_ms: f64,
    bump: Option<Bump>,
}

impl Default for SelectionPulse {
    fn default() -> Self {
        Self::new(DEFAULT_PULSE_PEAK, DEFAULT_PULSE_MS)
    }
}

impl SelectionPulse {
    pub fn new(peak: f64, duration_ms: f64) -> Self {
        Self {
            peak,
            duration_ms: duration_ms.max(0.0),
            bump: None,
        }
    }

    /// Restart the pulse on `body`. A pulse already running elsewhere is dropped.
    pub fn start(&mut self, body: BodyId, now_ms: f64) {
        self.bump = Some(Bump { body, start_ms: now_ms });
    }

    /// Retire the pulse once its time is up.
    pub fn step(&mut self, now_ms: f64) {
        if let Some(bump) = self.bump {
            if self.duration_ms <= 0.0 || now_ms - bump.start_ms >= self.duration_ms {
                self.bump = None;
            }
        }
    }

    /// Body currently pulsing.
    pub fn body(&self) -> Option<BodyId> {
        self.bump.map(|b| b.body)
    }

    /// Scale multiplier for `body` at `now_ms` (1.0 when not pulsing).
    pub fn scale_at(&self, body: BodyId, now_ms: f64) -> f64 {
        match self.bump {
            Some(bump) if bump.body == body && self.duration_ms > 0.0 => {
                let t = (now_ms - bump.start_ms) / self.duration_ms;
                if !(0.0..1.0).contains(&t) {
                    return 1.0;
                }
                lerp(1.0, self.peak, Easing::Triangle.apply(t))
            }
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peaks_half_way() {
        let mut pulse = SelectionPulse::default();
        let id = BodyId(3);
        pulse.start(id, 1000.0);
        assert_eq!(pulse.scale_at(id, 1000.0), 1.0);
        assert!((pulse.scale_at(id, 1125.0) - 1.06).abs() < 1e-12);
        assert!((pulse.scale_at(id, 1062.5) - 1.03).abs() < 1e-12);
        assert_eq!(pulse.scale_at(BodyId(4), 1125.0), 1.0);
    }

    #[test]
    fn ends_after_duration() {
        let mut pulse = SelectionPulse::default();
        pulse.start(BodyId(1), 0.0);
        pulse.step(100.0);
        assert_eq!(pulse.body(), Some(BodyId(1)));
        pulse.step(250.0);
        assert_eq!(pulse.body(), None);
        assert_eq!(pulse.scale_at(BodyId(1), 250.0), 1.0);
    }

    #[test]
    fn restart_moves_to_new_body() {
        let mut pulse = SelectionPulse::default();
        pulse.start(BodyId(1), 0.0);
        pulse.start(BodyId(2), 50.0);
        assert_eq!(pulse.body(), Some(BodyId(2)));
        assert_eq!(pulse.scale_at(BodyId(1), 100.0), 1.0);
    }
}
