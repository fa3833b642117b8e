// extensions/transition.rs
//
// Camera transition. Eases the camera from one pose to another over a fixed
// wall-clock duration. Driven by `step(now_ms)` from the frame loop.
//
// Usage:
//   let mut transition = CameraTransition::default();
//   transition.focus_request(rig.pose(), end_pose, now_ms, 900.0);
//   if let Some(pose) = transition.step(now_ms) { rig.set_pose(pose); }

use crate::renderer::camera::CameraPose;
use super::easing::{Easing, ease_dvec3};

/// An in-flight move between two camera poses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveTransition {
    pub start: CameraPose,
    pub end: CameraPose,
    /// Wall timestamp the move began, in milliseconds.
    pub start_ms: f64,
    /// Length of the move in milliseconds (>= 0).
    pub duration_ms: f64,
    pub easing: Easing,
}

impl ActiveTransition {
    /// Normalized progress in [0, 1] at `now_ms`.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let t = (now_ms - self.start_ms) / self.duration_ms;
        if t.is_nan() {
            return 0.0;
        }
        t.clamp(0.0, 1.0)
    }

    /// Pose at `now_ms`. Exactly `start` at t = 0 and exactly `end` at t = 1.
    pub fn pose_at(&self, now_ms: f64) -> CameraPose {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.end;
        }
        if t <= 0.0 {
            return self.start;
        }
        CameraPose {
            position: ease_dvec3(self.start.position, self.end.position, t, self.easing),
            target: ease_dvec3(self.start.target, self.end.target, t, self.easing),
        }
    }
}

/// Idle, or moving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CameraTransition {
    #[default]
    Idle,
    Active(ActiveTransition),
}

impl CameraTransition {
    /// Begin a move from `from` to `to`. Any in-flight move is discarded;
    /// callers pass the camera's live pose as `from` so the new move picks up
    /// wherever the old one left the camera.
    pub fn focus_request(&mut self, from: CameraPose, to: CameraPose, now_ms: f64, duration_ms: f64) {
        let duration_ms = if duration_ms.is_finite() { duration_ms.max(0.0) } else { 0.0 };
        if self.is_active() {
            log::debug!("transition: superseding in-flight move");
        }
        *self = CameraTransition::Active(ActiveTransition {
            start: from,
            end: to,
            start_ms: now_ms,
            duration_ms,
            easing: Easing::QuadInOut,
        });
    }

    /// Advance to `now_ms`. Returns the pose to apply to the camera, or
    /// `None` when idle. Returns to Idle once the end pose has been emitted.
    pub fn step(&mut self, now_ms: f64) -> Option<CameraPose> {
        let CameraTransition::Active(active) = *self else {
            return None;
        };
        let pose = active.pose_at(now_ms);
        if active.progress(now_ms) >= 1.0 {
            *self = CameraTransition::Idle;
        }
        Some(pose)
    }

    /// Pose at `now_ms` without changing state.
    pub fn sample(&self, now_ms: f64) -> Option<CameraPose> {
        match self {
            CameraTransition::Idle => None,
            CameraTransition::Active(active) => Some(active.pose_at(now_ms)),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CameraTransition::Active(_))
    }

    /// Final pose of the in-flight move, if any.
    pub fn destination(&self) -> Option<CameraPose> {
        match self {
            CameraTransition::Idle => None,
            CameraTransition::Active(active) => Some(active.end),
        }
    }
}
