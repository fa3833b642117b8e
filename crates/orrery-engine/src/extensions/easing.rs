// extensions/easing.rs
//
// Pure easing functions for camera and selection animations.
// No dependencies on the body tree, just math.

use glam::DVec3;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Slow start and end. Used for camera focus moves.
    #[default]
    QuadInOut,
    /// Up to 1 at the midpoint, then back down to 0. Used for the selection pulse.
    Triangle,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::Triangle => {
                if t < 0.5 {
                    t * 2.0
                } else {
                    2.0 - t * 2.0
                }
            }
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_dvec3(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a + (b - a) * t
}

/// Interpolate points with easing.
#[inline]
pub fn ease_dvec3(a: DVec3, b: DVec3, t: f64, easing: Easing) -> DVec3 {
    lerp_dvec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_in_out_endpoints_are_exact() {
        assert_eq!(Easing::QuadInOut.apply(0.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(1.0), 1.0);
        assert_eq!(Easing::QuadInOut.apply(0.5), 0.5);
    }

    #[test]
    fn quad_in_out_is_symmetric() {
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            let a = Easing::QuadInOut.apply(t);
            let b = 1.0 - Easing::QuadInOut.apply(1.0 - t);
            assert!((a - b).abs() < 1e-12, "t = {t}");
        }
        assert!((Easing::QuadInOut.apply(0.25) - 0.125).abs() < 1e-12);
    }

    #[test]
    fn triangle_peaks_mid_way() {
        assert_eq!(Easing::Triangle.apply(0.0), 0.0);
        assert_eq!(Easing::Triangle.apply(0.5), 1.0);
        assert_eq!(Easing::Triangle.apply(1.0), 0.0);
        assert!((Easing::Triangle.apply(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(7.0), 1.0);
        assert_eq!(Easing::Triangle.apply(7.0), 0.0);
    }

    #[test]
    fn ease_interpolates() {
        assert!((lerp(100.0, 200.0, 0.5) - 150.0).abs() < 0.001);
        let p = ease_dvec3(DVec3::ZERO, DVec3::splat(2.0), 0.5, Easing::QuadInOut);
        assert!((p - DVec3::ONE).length() < 1e-12);
    }
}
