//! Body records: the nodes of the orrery hierarchy.
//!
//! A `BodyDef` is the immutable roster entry supplied at startup; a `Body`
//! is the live record in the tree arena, carrying the kinematic state that
//! `BodyTree::advance` mutates every frame.

use glam::{DAffine3, DVec3};
use serde::{Deserialize, Serialize};

use crate::api::types::BodyId;
use crate::core::kinematics::{orbital_velocity, spin_velocity, wrap_angle};

/// What a body is. Determines which parent kinds are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    Star,
    Planet,
    Moon,
}

impl BodyKind {
    /// The kind this kind must orbit, or `None` for the root.
    pub fn parent_kind(self) -> Option<BodyKind> {
        match self {
            BodyKind::Star => None,
            BodyKind::Planet => Some(BodyKind::Star),
            BodyKind::Moon => Some(BodyKind::Planet),
        }
    }

    /// Whether pointer picks may select this kind.
    pub fn is_pickable(self) -> bool {
        !matches!(self, BodyKind::Star)
    }

    /// Stable numeric code used on the renderer wire.
    pub fn code(self) -> f32 {
        match self {
            BodyKind::Star => 0.0,
            BodyKind::Planet => 1.0,
            BodyKind::Moon => 2.0,
        }
    }
}

/// Planetary ring, sized in multiples of the body radius. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingDef {
    pub inner: f64,
    pub outer: f64,
    #[serde(default = "default_color")]
    pub color: u32,
}

/// Immutable roster entry for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDef {
    /// Unique name, also the focus key.
    pub name: String,
    pub kind: BodyKind,
    /// Sphere radius in scene units.
    pub radius: f64,
    /// Distance from the parent's origin in scene units (0 for the star).
    #[serde(default)]
    pub distance: f64,
    /// Orbital period in days; 0 means no orbital motion.
    #[serde(default)]
    pub orbital_period_days: f64,
    /// Signed rotation period in hours; negative is retrograde, 0 is no spin.
    #[serde(default)]
    pub rotation_hours: f64,
    #[serde(default)]
    pub tilt_degrees: f64,
    /// Name of the body this one orbits.
    #[serde(default)]
    pub parent: Option<String>,
    /// Display color as 0xRRGGBB.
    #[serde(default = "default_color")]
    pub color: u32,
    #[serde(default)]
    pub ring: Option<RingDef>,
    /// Explicit starting phases; random (seeded) when absent.
    #[serde(default)]
    pub initial_orbit_angle: Option<f64>,
    #[serde(default)]
    pub initial_spin_angle: Option<f64>,
}

fn default_color() -> u32 {
    0xffffff
}

impl BodyDef {
    pub fn new(name: impl Into<String>, kind: BodyKind, radius: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            radius,
            distance: 0.0,
            orbital_period_days: 0.0,
            rotation_hours: 0.0,
            tilt_degrees: 0.0,
            parent: None,
            color: default_color(),
            ring: None,
            initial_orbit_angle: None,
            initial_spin_angle: None,
        }
    }

    pub fn star(name: impl Into<String>, radius: f64) -> Self {
        Self::new(name, BodyKind::Star, radius)
    }

    pub fn planet(name: impl Into<String>, parent: impl Into<String>, radius: f64) -> Self {
        Self::new(name, BodyKind::Planet, radius).with_parent(parent)
    }

    pub fn moon(name: impl Into<String>, parent: impl Into<String>, radius: f64) -> Self {
        Self::new(name, BodyKind::Moon, radius).with_parent(parent)
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_orbit(mut self, distance: f64, period_days: f64) -> Self {
        self.distance = distance;
        self.orbital_period_days = period_days;
        self
    }

    pub fn with_rotation(mut self, hours: f64) -> Self {
        self.rotation_hours = hours;
        self
    }

    pub fn with_tilt(mut self, degrees: f64) -> Self {
        self.tilt_degrees = degrees;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_ring(mut self, inner: f64, outer: f64, color: u32) -> Self {
        self.ring = Some(RingDef { inner, outer, color });
        self
    }

    pub fn with_phases(mut self, orbit_angle: f64, spin_angle: f64) -> Self {
        self.initial_orbit_angle = Some(orbit_angle);
        self.initial_spin_angle = Some(spin_angle);
        self
    }
}

/// Live body record in the tree arena.
#[derive(Debug, Clone)]
pub struct Body {
    pub(crate) id: BodyId,
    name: String,
    kind: BodyKind,
    radius: f64,
    distance: f64,
    tilt_degrees: f64,
    color: u32,
    ring: Option<RingDef>,
    orbital_period_days: f64,
    rotation_hours: f64,
    /// rad/day, derived once from the periods.
    orbital_velocity: f64,
    spin_velocity: f64,
    pub(crate) parent: Option<BodyId>,
    pub(crate) children: Vec<BodyId>,
    orbit_angle: f64,
    spin_angle: f64,
}

impl Body {
    /// Build the live record. The definition must already be validated.
    pub(crate) fn from_def(id: BodyId, def: &BodyDef, orbit_angle: f64, spin_angle: f64) -> Self {
        Self {
            id,
            name: def.name.clone(),
            kind: def.kind,
            radius: def.radius,
            distance: def.distance,
            tilt_degrees: def.tilt_degrees,
            color: def.color,
            ring: def.ring,
            orbital_period_days: def.orbital_period_days,
            rotation_hours: def.rotation_hours,
            orbital_velocity: orbital_velocity(def.orbital_period_days),
            spin_velocity: spin_velocity(def.rotation_hours),
            parent: None,
            children: Vec::new(),
            orbit_angle: wrap_angle(orbit_angle),
            spin_angle: wrap_angle(spin_angle),
        }
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn tilt_degrees(&self) -> f64 {
        self.tilt_degrees
    }

    pub fn color(&self) -> u32 {
        self.color
    }

    pub fn ring(&self) -> Option<&RingDef> {
        self.ring.as_ref()
    }

    pub fn orbital_period_days(&self) -> f64 {
        self.orbital_period_days
    }

    pub fn rotation_hours(&self) -> f64 {
        self.rotation_hours
    }

    pub fn orbital_velocity(&self) -> f64 {
        self.orbital_velocity
    }

    pub fn spin_velocity(&self) -> f64 {
        self.spin_velocity
    }

    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    pub fn children(&self) -> &[BodyId] {
        &self.children
    }

    pub fn orbit_angle(&self) -> f64 {
        self.orbit_angle
    }

    pub fn spin_angle(&self) -> f64 {
        self.spin_angle
    }

    /// Whether this body revolves around its parent.
    pub fn orbits(&self) -> bool {
        self.parent.is_some() && self.orbital_velocity != 0.0
    }

    /// Advance both phases by `delta_days`, wrapped into [0, 2π).
    pub(crate) fn advance(&mut self, delta_days: f64) {
        self.orbit_angle = wrap_angle(self.orbit_angle + self.orbital_velocity * delta_days);
        self.spin_angle = wrap_angle(self.spin_angle + self.spin_velocity * delta_days);
    }

    /// Transform from this body's frame into its parent's frame:
    /// orbit about +Y, then out along +X, then axial tilt about +Z, then spin about +Y.
    pub fn local_transform(&self) -> DAffine3 {
        DAffine3::from_rotation_y(self.orbit_angle)
            * DAffine3::from_translation(DVec3::X * self.distance)
            * DAffine3::from_rotation_z(self.tilt_degrees.to_radians())
            * DAffine3::from_rotation_y(self.spin_angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn body(def: &BodyDef, orbit: f64, spin: f64) -> Body {
        Body::from_def(BodyId(0), def, orbit, spin)
    }

    #[test]
    fn local_transform_places_body_on_orbit() {
        let def = BodyDef::planet("P", "S", 1.0).with_orbit(10.0, 100.0);
        let b = body(&def, FRAC_PI_2, 0.0);
        let p = b.local_transform().translation;
        // Rotating +X by 90° about +Y lands on -Z.
        assert!((p - DVec3::new(0.0, 0.0, -10.0)).length() < 1e-12, "p = {p}");
    }

    #[test]
    fn tilt_tips_the_spin_axis() {
        let def = BodyDef::planet("P", "S", 1.0).with_tilt(90.0);
        let b = body(&def, 0.0, 0.0);
        let up = b.local_transform().transform_vector3(DVec3::Y);
        assert!((up - DVec3::new(-1.0, 0.0, 0.0)).length() < 1e-12, "up = {up}");
    }

    #[test]
    fn advance_wraps_angles() {
        let def = BodyDef::planet("P", "S", 1.0)
            .with_orbit(5.0, 10.0)
            .with_rotation(-24.0);
        let mut b = body(&def, 0.0, 0.0);
        b.advance(25.0);
        assert!((b.orbit_angle() - TAU * 0.5).abs() < 1e-9);
        // 25 retrograde days leave the spin at 0 mod 2π.
        let s = b.spin_angle();
        assert!(s < 1e-9 || TAU - s < 1e-9, "spin = {s}");
        assert!((0.0..TAU).contains(&s));
    }

    #[test]
    fn def_parses_with_defaults() {
        let json = r#"{ "name": "Moon", "kind": "moon", "radius": 0.2, "parent": "Earth" }"#;
        let def: BodyDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.kind, BodyKind::Moon);
        assert_eq!(def.parent.as_deref(), Some("Earth"));
        assert_eq!(def.distance, 0.0);
        assert_eq!(def.color, 0xffffff);
        assert!(def.initial_orbit_angle.is_none());
    }
}
