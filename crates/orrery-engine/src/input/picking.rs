use glam::{DVec2, DVec3};
use serde::Serialize;

use crate::api::types::BodyId;
use crate::core::body::BodyKind;
use crate::core::tree::BodyTree;
use crate::renderer::camera::CameraRig;

/// A half-line in world space. `direction` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.try_normalize().unwrap_or(DVec3::NEG_Z),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Smallest positive distance along the ray to the sphere surface, if any.
    /// From inside the sphere this is the exit point.
    pub fn intersect_sphere(&self, center: DVec3, radius: f64) -> Option<f64> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        if near > 0.0 {
            return Some(near);
        }
        let far = -b + root;
        (far > 0.0).then_some(far)
    }
}

/// What a successful pick hit, captured at pick time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResult {
    pub body: BodyId,
    pub name: String,
    pub kind: BodyKind,
    pub world_position: DVec3,
    pub radius: f64,
    /// Base distance from the parent, in scene units.
    pub base_distance: f64,
    /// Distance along the pick ray to the hit.
    pub hit_distance: f64,
    /// For moons, the planet they orbit; for planets, themselves.
    pub owning_planet: Option<BodyId>,
}

impl SelectionResult {
    /// One-line description for an info panel.
    pub fn describe(&self) -> String {
        let name = match self.kind {
            BodyKind::Moon => format!("{} (moon)", self.name),
            _ => self.name.clone(),
        };
        format!(
            "{}: radius ~ {:.2} units, distance from center ~ {:.1} units",
            name, self.radius, self.base_distance
        )
    }
}

/// Cast a ray through `ndc` and return the nearest pickable body it hits.
/// Equal distances keep the body that comes first in pre-order.
pub fn pick(ndc: DVec2, camera: &CameraRig, tree: &BodyTree) -> Option<SelectionResult> {
    let ray = camera.ray_from_ndc(ndc);
    pick_with_ray(&ray, tree)
}

pub fn pick_with_ray(ray: &Ray, tree: &BodyTree) -> Option<SelectionResult> {
    let transforms = tree.world_transforms();
    let mut best: Option<(BodyId, f64)> = None;

    for body in tree.all_bodies() {
        if !body.kind().is_pickable() {
            continue;
        }
        let center = transforms[body.id().index()].translation;
        let Some(t) = ray.intersect_sphere(center, body.radius()) else {
            continue;
        };
        if best.map_or(true, |(_, best_t)| t < best_t) {
            best = Some((body.id(), t));
        }
    }

    let (id, hit_distance) = best?;
    let body = tree.body(id);
    let result = SelectionResult {
        body: id,
        name: body.name().to_string(),
        kind: body.kind(),
        world_position: transforms[id.index()].translation,
        radius: body.radius(),
        base_distance: body.distance(),
        hit_distance,
        owning_planet: tree.owning_planet(id),
    };
    log::debug!("pick: {} at {:.2}", result.name, hit_distance);
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::body::BodyDef;
    use crate::renderer::camera::{CameraPose, CameraSettings};

    fn tree() -> BodyTree {
        let defs = vec![
            BodyDef::star("Sun", 6.0),
            BodyDef::planet("Near", "Sun", 2.0).with_orbit(20.0, 100.0).with_phases(0.0, 0.0),
            BodyDef::planet("Far", "Sun", 5.0).with_orbit(40.0, 200.0).with_phases(0.0, 0.0),
            BodyDef::moon("Pebble", "Near", 0.5).with_orbit(3.0, 10.0).with_phases(0.0, 0.0),
        ];
        BodyTree::new(&defs, 1).unwrap()
    }

    #[test]
    fn ray_sphere_distances() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::NEG_Z);
        assert_eq!(ray.intersect_sphere(DVec3::ZERO, 2.0), Some(8.0));
        assert_eq!(ray.intersect_sphere(DVec3::new(5.0, 0.0, 0.0), 2.0), None);
        // Behind the origin.
        assert_eq!(ray.intersect_sphere(DVec3::new(0.0, 0.0, 20.0), 2.0), None);
        // From inside, the exit point.
        let inside = Ray::new(DVec3::ZERO, DVec3::X);
        assert_eq!(inside.intersect_sphere(DVec3::ZERO, 3.0), Some(3.0));
    }

    #[test]
    fn nearer_sphere_wins_along_ray() {
        // Looking down -X from beyond "Far": the ray crosses Far (x = 40) before Near (x = 20).
        let ray = Ray::new(DVec3::new(100.0, 0.0, 0.0), DVec3::NEG_X);
        let hit = pick_with_ray(&ray, &tree()).unwrap();
        assert_eq!(hit.name, "Far");
        assert!((hit.hit_distance - 55.0).abs() < 1e-9);

        // From the other side Near comes first; the star is skipped.
        let ray = Ray::new(DVec3::new(-100.0, 0.0, 0.0), DVec3::X);
        let t = tree();
        let hit = pick_with_ray(&ray, &t).unwrap();
        assert_eq!(hit.name, "Near");
        assert_eq!(hit.owning_planet, t.find("Near"));
    }

    #[test]
    fn overlapping_spheres_pick_nearest_entry() {
        // Big spans x in [24, 36], Small spans [31, 37]: they overlap.
        let defs = vec![
            BodyDef::star("Sun", 6.0).with_rotation(25.0),
            BodyDef::planet("Big", "Sun", 6.0).with_orbit(30.0, 100.0).with_phases(0.0, 0.0),
            BodyDef::planet("Small", "Sun", 3.0).with_orbit(34.0, 100.0).with_phases(0.0, 0.0),
        ];
        let t = BodyTree::new(&defs, 5).unwrap();

        // From +X the ray enters Small at x = 37, then Big at x = 36 while still inside Small.
        let ray = Ray::new(DVec3::new(100.0, 0.0, 0.0), DVec3::NEG_X);
        let hit = pick_with_ray(&ray, &t).unwrap();
        assert_eq!(hit.name, "Small");
        assert!((hit.hit_distance - 63.0).abs() < 1e-9);

        // From -X it enters Big at x = 24 first.
        let ray = Ray::new(DVec3::new(-100.0, 0.0, 0.0), DVec3::X);
        let hit = pick_with_ray(&ray, &t).unwrap();
        assert_eq!(hit.name, "Big");
        assert!((hit.hit_distance - 124.0).abs() < 1e-9);
    }

    #[test]
    fn star_is_not_pickable() {
        let ray = Ray::new(DVec3::new(0.0, 100.0, 0.0), DVec3::NEG_Y);
        assert!(pick_with_ray(&ray, &tree()).is_none());
    }

    #[test]
    fn moon_resolves_owning_planet() {
        let t = tree();
        // Pebble sits at x = 23, just past Near's surface at x = 22.
        let ray = Ray::new(DVec3::new(23.0, 100.0, 0.0), DVec3::NEG_Y);
        let hit = pick_with_ray(&ray, &t).unwrap();
        assert_eq!(hit.name, "Pebble");
        assert_eq!(hit.kind, BodyKind::Moon);
        assert_eq!(hit.owning_planet, t.find("Near"));
        assert_eq!(
            hit.describe(),
            "Pebble (moon): radius ~ 0.50 units, distance from center ~ 3.0 units"
        );
    }

    #[test]
    fn miss_through_camera_is_none() {
        let mut camera = CameraRig::new(
            CameraPose::looking_at_origin(DVec3::new(0.0, 0.0, 100.0)),
            CameraSettings::default(),
        );
        camera.resize(1000.0, 1000.0);
        assert!(pick(DVec2::new(0.9, 0.9), &camera, &tree()).is_none());

        // Straight down the middle hits only the star, which is not pickable.
        assert!(pick(DVec2::ZERO, &camera, &tree()).is_none());
    }

    #[test]
    fn hit_through_camera() {
        let mut camera = CameraRig::new(
            CameraPose::new(DVec3::new(20.0, 0.0, 100.0), DVec3::new(20.0, 0.0, 0.0)),
            CameraSettings::default(),
        );
        camera.resize(1000.0, 1000.0);
        let hit = pick(DVec2::ZERO, &camera, &tree()).unwrap();
        assert_eq!(hit.name, "Near");
        assert!((hit.world_position - DVec3::new(20.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn top_down_camera_picks_off_centre() {
        let mut camera = CameraRig::new(
            CameraPose::looking_at_origin(DVec3::new(0.0, 100.0, 0.0)),
            CameraSettings::default(),
        );
        camera.resize(1000.0, 1000.0);
        // x = 0.35 · tan(30°) · 100 ≈ 20.2 on the ecliptic: inside Near.
        let hit = pick(DVec2::new(0.35, 0.0), &camera, &tree()).unwrap();
        assert_eq!(hit.name, "Near");
    }
}
