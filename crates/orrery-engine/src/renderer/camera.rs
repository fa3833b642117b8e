use glam::{DMat4, DVec2, DVec3, DVec4};
use serde::{Deserialize, Serialize};

use crate::input::picking::Ray;

/// A camera position plus the point it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: DVec3,
    pub target: DVec3,
}

impl CameraPose {
    pub const fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Looking at the origin from `position`.
    pub const fn looking_at_origin(position: DVec3) -> Self {
        Self::new(position, DVec3::ZERO)
    }

    /// Unit vector from the target back toward the camera, or `None` when they coincide.
    pub fn back_direction(&self) -> Option<DVec3> {
        (self.position - self.target).try_normalize()
    }
}

/// Projection and interactive-control limits for the camera rig.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_y_degrees: f64,
    pub near: f64,
    pub far: f64,
    /// Closest the interactive controls may bring the camera to its target.
    pub min_distance: f64,
    /// Farthest the interactive controls may push the camera from its target.
    pub max_distance: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 5000.0,
            min_distance: 5.0,
            max_distance: 1500.0,
        }
    }
}

/// Keeps the camera this far (radians) from straight up or down while orbiting.
const POLE_MARGIN: f64 = 1e-3;

/// Perspective camera with orbit/pan/dolly controls around a look target.
/// Y is up. This is the state transitions write into and picking reads from.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pose: CameraPose,
    settings: CameraSettings,
    /// Viewport width / height.
    aspect: f64,
}

impl CameraRig {
    pub fn new(pose: CameraPose, settings: CameraSettings) -> Self {
        Self {
            pose,
            settings,
            aspect: 16.0 / 9.0,
        }
    }

    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    pub fn position(&self) -> DVec3 {
        self.pose.position
    }

    pub fn target(&self) -> DVec3 {
        self.pose.target
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn aspect(&self) -> f64 {
        self.aspect
    }

    /// Place the camera directly. Transitions use this; no distance limits apply.
    pub fn set_pose(&mut self, pose: CameraPose) {
        self.pose = pose;
    }

    /// Update the aspect ratio from the viewport size (e.g. on window resize).
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite() {
            self.aspect = width / height;
        }
    }

    /// Distance from the camera to its look target.
    pub fn distance(&self) -> f64 {
        self.pose.position.distance(self.pose.target)
    }

    /// World up for the view basis: +Y, or -Z when looking straight along Y
    /// (screen-up then points away from the default viewer).
    pub fn up(&self) -> DVec3 {
        if self.forward().cross(DVec3::Y).length_squared() < 1e-12 {
            DVec3::NEG_Z
        } else {
            DVec3::Y
        }
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.pose.position, self.pose.target, self.up())
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(
            self.settings.fov_y_degrees.to_radians(),
            self.aspect,
            self.settings.near,
            self.settings.far,
        )
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the camera through a point in normalized device
    /// coordinates ([-1, 1]², +y up).
    pub fn ray_from_ndc(&self, ndc: DVec2) -> Ray {
        let inverse = self.view_projection().inverse();
        // perspective_rh maps depth to [0, 1]: 0 is the near plane.
        let near = inverse * DVec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inverse * DVec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        let direction = (far - near).try_normalize().unwrap_or(self.forward());
        Ray::new(self.pose.position, direction)
    }

    /// Unit view direction, or -Z when position and target coincide.
    pub fn forward(&self) -> DVec3 {
        (self.pose.target - self.pose.position)
            .try_normalize()
            .unwrap_or(DVec3::NEG_Z)
    }

    /// Orbit the camera around its target by yaw (about +Y) and pitch (radians).
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = self.pose.position - self.pose.target;
        let radius = offset.length();
        if radius == 0.0 {
            return;
        }
        let mut azimuth = offset.x.atan2(offset.z);
        let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();
        azimuth += yaw;
        polar = (polar - pitch).clamp(POLE_MARGIN, std::f64::consts::PI - POLE_MARGIN);

        let dir = DVec3::new(
            polar.sin() * azimuth.sin(),
            polar.cos(),
            polar.sin() * azimuth.cos(),
        );
        self.pose.position = self.pose.target + dir * radius;
    }

    /// Move toward (factor < 1) or away from (factor > 1) the target,
    /// clamped to the configured distance limits.
    pub fn dolly(&mut self, factor: f64) {
        if !(factor > 0.0 && factor.is_finite()) {
            return;
        }
        let Some(back) = self.pose.back_direction() else { return };
        let distance = (self.distance() * factor)
            .clamp(self.settings.min_distance, self.settings.max_distance);
        self.pose.position = self.pose.target + back * distance;
    }

    /// Slide both camera and target in the view plane, in world units.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let forward = self.forward();
        let right = forward.cross(self.up()).try_normalize().unwrap_or(DVec3::X);
        let up = right.cross(forward);
        let shift = right * dx + up * dy;
        self.pose.position += shift;
        self.pose.target += shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig() -> CameraRig {
        let mut rig = CameraRig::new(
            CameraPose::looking_at_origin(DVec3::new(0.0, 0.0, 100.0)),
            CameraSettings::default(),
        );
        rig.resize(800.0, 600.0);
        rig
    }

    #[test]
    fn center_ray_points_at_target() {
        let ray = rig().ray_from_ndc(DVec2::ZERO);
        assert!((ray.origin - DVec3::new(0.0, 0.0, 100.0)).length() < 1e-9);
        assert!((ray.direction - DVec3::NEG_Z).length() < 1e-9, "dir = {}", ray.direction);
    }

    #[test]
    fn corner_rays_fan_out() {
        let r = rig();
        let up = r.ray_from_ndc(DVec2::new(0.0, 1.0));
        let right = r.ray_from_ndc(DVec2::new(1.0, 0.0));
        // Top edge sits half the vertical FOV above the axis.
        let angle = up.direction.angle_between(DVec3::NEG_Z);
        assert!((angle - 30f64.to_radians()).abs() < 1e-9, "angle = {angle}");
        assert!(up.direction.y > 0.0);
        assert!(right.direction.x > 0.0);
        // Wider than tall at 4:3.
        assert!(right.direction.angle_between(DVec3::NEG_Z) > angle);
    }

    #[test]
    fn dolly_respects_limits() {
        let mut r = rig();
        r.dolly(0.001);
        assert!((r.distance() - 5.0).abs() < 1e-9);
        r.dolly(1e6);
        assert!((r.distance() - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut r = rig();
        r.orbit(0.7, 0.3);
        assert!((r.distance() - 100.0).abs() < 1e-9);
        assert!(r.position().y > 0.0);
        assert_eq!(r.target(), DVec3::ZERO);
    }

    #[test]
    fn pan_moves_target_with_camera() {
        let mut r = rig();
        r.pan(10.0, 0.0);
        assert!((r.target() - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-9, "target = {}", r.target());
        assert!((r.distance() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn straight_down_view_still_fans_out() {
        let mut r = CameraRig::new(
            CameraPose::looking_at_origin(DVec3::new(0.0, 100.0, 0.0)),
            CameraSettings::default(),
        );
        r.resize(1000.0, 1000.0);
        assert_eq!(r.up(), DVec3::NEG_Z);
        assert!(r.view_matrix().is_finite());

        let center = r.ray_from_ndc(DVec2::ZERO);
        assert!((center.direction - DVec3::NEG_Y).length() < 1e-9);

        // Right of centre lands on +X, above centre on -Z.
        let right = r.ray_from_ndc(DVec2::new(0.3, 0.0));
        let t = -right.origin.y / right.direction.y;
        let hit = right.at(t);
        let expected_x = 100.0 * 0.3 * 30f64.to_radians().tan();
        assert!((hit.x - expected_x).abs() < 1e-6, "hit = {hit}");
        assert!(hit.z.abs() < 1e-6);

        let up = r.ray_from_ndc(DVec2::new(0.0, 0.3));
        assert!(up.direction.z < 0.0);

        r.pan(5.0, 0.0);
        assert!((r.target() - DVec3::new(5.0, 0.0, 0.0)).length() < 1e-9);
    }
}
