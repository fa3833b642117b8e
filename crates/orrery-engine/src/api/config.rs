use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::api::error::OrreryError;
use crate::assets::roster::solar_system;
use crate::core::body::BodyDef;
use crate::core::time::DEFAULT_MAX_FRAME_SECONDS;
use crate::renderer::camera::{CameraPose, CameraSettings};

/// Startup configuration for an [`Orrery`](crate::api::orrery::Orrery).
/// Every field has a default, so a JSON config only names what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrreryConfig {
    /// The body roster. Exactly one star; planets orbit it, moons orbit planets.
    pub bodies: Vec<BodyDef>,
    /// Initial simulated days per real second.
    pub speed_days_per_second: f64,
    /// Clamp on the wall time consumed by one frame.
    pub max_frame_seconds: f64,
    pub start_paused: bool,
    /// Length of camera focus moves, in milliseconds.
    pub focus_duration_ms: f64,
    /// Focused camera distance in body radii...
    pub focus_distance_factor: f64,
    /// ...but never closer than this.
    pub min_focus_distance: f64,
    /// Where the camera starts and where `ResetCamera` returns it.
    pub home_pose: CameraPose,
    /// Where focusing the star sends the camera.
    pub overview_pose: CameraPose,
    /// Seed for the initial orbit/spin phases.
    pub phase_seed: u64,
    pub camera: CameraSettings,
    pub show_orbit_paths: bool,
    pub show_labels: bool,
    pub show_axes: bool,
}

impl Default for OrreryConfig {
    fn default() -> Self {
        Self {
            bodies: solar_system(),
            speed_days_per_second: 1.0,
            max_frame_seconds: DEFAULT_MAX_FRAME_SECONDS,
            start_paused: false,
            focus_duration_ms: 900.0,
            focus_distance_factor: 8.0,
            min_focus_distance: 25.0,
            home_pose: CameraPose::looking_at_origin(DVec3::new(0.0, 120.0, 280.0)),
            overview_pose: CameraPose::looking_at_origin(DVec3::new(0.0, 80.0, 160.0)),
            phase_seed: 42,
            camera: CameraSettings::default(),
            show_orbit_paths: true,
            show_labels: true,
            show_axes: false,
        }
    }
}

impl OrreryConfig {
    /// Parse a config from a JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_bodies(mut self, bodies: Vec<BodyDef>) -> Self {
        self.bodies = bodies;
        self
    }

    /// Camera distance used when focusing a body of `radius`.
    pub fn focus_distance(&self, radius: f64) -> f64 {
        (radius * self.focus_distance_factor).max(self.min_focus_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::BodyKind;

    #[test]
    fn empty_json_is_default() {
        let config = OrreryConfig::from_json("{}").unwrap();
        assert_eq!(config, OrreryConfig::default());
        assert_eq!(config.bodies.len(), 10);
        assert_eq!(config.camera.fov_y_degrees, 60.0);
    }

    #[test]
    fn partial_json_overrides() {
        let json = r#"{
            "speed_days_per_second": 20.0,
            "phase_seed": 9,
            "camera": { "far": 9000.0 },
            "home_pose": { "position": [0.0, 10.0, 50.0], "target": [0.0, 0.0, 0.0] },
            "bodies": [
                { "name": "Sol", "kind": "star", "radius": 3.0 },
                { "name": "Rock", "kind": "planet", "radius": 1.0, "parent": "Sol",
                  "distance": 12.0, "orbital_period_days": 50.0 }
            ]
        }"#;
        let config = OrreryConfig::from_json(json).unwrap();
        assert_eq!(config.speed_days_per_second, 20.0);
        assert_eq!(config.phase_seed, 9);
        assert_eq!(config.camera.far, 9000.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.home_pose.position, DVec3::new(0.0, 10.0, 50.0));
        assert_eq!(config.bodies.len(), 2);
        assert_eq!(config.bodies[1].kind, BodyKind::Planet);
        assert_eq!(config.bodies[1].parent.as_deref(), Some("Sol"));
        assert_eq!(config.focus_duration_ms, 900.0);
    }

    #[test]
    fn malformed_json_is_config_error() {
        let err = OrreryConfig::from_json("{ \"speed_days_per_second\": \"fast\" }").unwrap_err();
        assert!(matches!(err, OrreryError::Config(_)));
    }

    #[test]
    fn focus_distance_has_a_floor() {
        let config = OrreryConfig::default();
        assert_eq!(config.focus_distance(1.0), 25.0);
        assert_eq!(config.focus_distance(10.0), 80.0);
    }
}
