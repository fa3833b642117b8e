// core/tree.rs
//
// Body hierarchy: an arena of body records linked by BodyId handles.
// World transforms are composed by walking parent links, never cached,
// so there is no propagation step to forget.
//
// Usage:
//   let mut tree = BodyTree::new(&roster, seed)?;
//   tree.advance(delta_days);
//   let world = tree.world_transform_of(id);

use std::collections::HashMap;
use glam::{DAffine3, DVec3};
use crate::api::error::{DefinitionFault, OrreryError};
use crate::api::types::BodyId;
use crate::core::body::{Body, BodyDef, BodyKind};
use crate::core::rng::Rng;

/// Owns every body and the parent → children structure.
#[derive(Debug, Clone)]
pub struct BodyTree {
    bodies: Vec<Body>,
    root: BodyId,
    by_name: HashMap<String, BodyId>,
}

impl BodyTree {
    /// Validate `defs` and build the tree.
    ///
    /// Bodies without explicit initial phases get angles drawn from a
    /// xorshift generator seeded with `phase_seed`, so the same roster and
    /// seed always produce the same sky. The star's orbit angle is pinned
    /// to 0. On any invalid definition nothing is built.
    pub fn new(defs: &[BodyDef], phase_seed: u64) -> Result<Self, OrreryError> {
        let by_name = validate(defs)?;

        let mut rng = Rng::new(phase_seed);
        let mut bodies = Vec::with_capacity(defs.len());
        let mut root = None;

        for (i, def) in defs.iter().enumerate() {
            let id = BodyId(i as u32);
            // Always draw both so explicit phases on one body don't reshuffle the rest.
            let drawn_orbit = rng.next_angle();
            let drawn_spin = rng.next_angle();

            let orbit = if def.kind == BodyKind::Star {
                root = Some(id);
                0.0
            } else {
                def.initial_orbit_angle.unwrap_or(drawn_orbit)
            };
            let spin = def.initial_spin_angle.unwrap_or(drawn_spin);
            bodies.push(Body::from_def(id, def, orbit, spin));
        }

        // Link children in roster order.
        for i in 0..bodies.len() {
            if let Some(parent_name) = defs[i].parent.as_deref() {
                let parent = by_name[parent_name];
                bodies[i].parent = Some(parent);
                bodies[parent.index()].children.push(BodyId(i as u32));
            }
        }

        let Some(root) = root else {
            return Err(OrreryError::invalid("<roster>", DefinitionFault::MissingStar));
        };

        log::info!(
            "orrery: built body tree with {} bodies rooted at {}",
            bodies.len(),
            bodies[root.index()].name()
        );

        Ok(Self { bodies, root, by_name })
    }

    /// The star.
    pub fn root(&self) -> BodyId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Always false for a successfully built tree (the star is required).
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    /// Body by handle.
    ///
    /// # Panics
    /// If `id` was not issued by this tree.
    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id.index()]
    }

    /// Look a body up by its unique name.
    pub fn find(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn parent(&self, id: BodyId) -> Option<BodyId> {
        self.get(id).and_then(|b| b.parent)
    }

    /// Nearest planet at or above `id`: the planet itself, a moon's planet,
    /// or `None` for the star. Walks parent links, O(depth).
    pub fn owning_planet(&self, id: BodyId) -> Option<BodyId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let body = self.get(current)?;
            if body.kind() == BodyKind::Planet {
                return Some(current);
            }
            cursor = body.parent;
        }
        None
    }

    /// Lazy pre-order walk over every body, parent before children.
    /// Each call starts a fresh walk.
    pub fn all_bodies(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root],
        }
    }

    /// Advance every body's orbit and spin phase by `delta_days`.
    /// A zero (paused) or non-finite delta is a no-op.
    pub fn advance(&mut self, delta_days: f64) {
        if delta_days == 0.0 || !delta_days.is_finite() {
            return;
        }
        // Each body's phase update is independent, so arena order is fine.
        for body in &mut self.bodies {
            body.advance(delta_days);
        }
    }

    /// Frame the children of `id` compose on, given `id`'s world transform.
    /// The star's tilt and spin stay on the star: planets sit in the
    /// identity frame. Below the star, children ride the parent's full frame.
    pub fn child_frame(&self, id: BodyId, world: DAffine3) -> DAffine3 {
        if id == self.root {
            DAffine3::IDENTITY
        } else {
            world
        }
    }

    /// World transform of `id`: local transforms composed from the root down.
    ///
    /// # Panics
    /// If `id` was not issued by this tree.
    pub fn world_transform_of(&self, id: BodyId) -> DAffine3 {
        let mut world = self.body(id).local_transform();
        let mut cursor = self.parent(id);
        while let Some(p) = cursor {
            let parent = self.body(p);
            world = self.child_frame(p, parent.local_transform()) * world;
            cursor = parent.parent;
        }
        world
    }

    /// World-space centre of `id`.
    pub fn world_position(&self, id: BodyId) -> DVec3 {
        self.world_transform_of(id).translation
    }

    /// Frame in which `id`'s circular orbit path lies: its parent's child
    /// frame (identity for the star and for planets).
    pub fn orbit_frame_of(&self, id: BodyId) -> DAffine3 {
        match self.parent(id) {
            Some(p) => self.child_frame(p, self.world_transform_of(p)),
            None => DAffine3::IDENTITY,
        }
    }

    /// Every body's world transform in one pre-order pass, indexed by `BodyId`.
    pub fn world_transforms(&self) -> Vec<DAffine3> {
        let mut out = vec![DAffine3::IDENTITY; self.bodies.len()];
        for body in self.all_bodies() {
            let parent_world = match body.parent {
                Some(p) => self.child_frame(p, out[p.index()]),
                None => DAffine3::IDENTITY,
            };
            out[body.id.index()] = parent_world * body.local_transform();
        }
        out
    }
}

/// Pre-order iterator returned by [`BodyTree::all_bodies`].
pub struct PreOrder<'a> {
    tree: &'a BodyTree,
    stack: Vec<BodyId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Body;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let body = self.tree.body(id);
        self.stack.extend(body.children.iter().rev());
        Some(body)
    }
}

/// Check every definition and the shape of the roster. Returns the name index.
fn validate(defs: &[BodyDef]) -> Result<HashMap<String, BodyId>, OrreryError> {
    let mut by_name: HashMap<String, BodyId> = HashMap::with_capacity(defs.len());
    let mut star_seen = false;

    for (i, def) in defs.iter().enumerate() {
        let fault = |f| Err(OrreryError::invalid(&def.name, f));

        if !(def.radius > 0.0 && def.radius.is_finite()) {
            return fault(DefinitionFault::BadRadius(def.radius));
        }
        if !(def.orbital_period_days >= 0.0 && def.orbital_period_days.is_finite()) {
            return fault(DefinitionFault::BadOrbitalPeriod(def.orbital_period_days));
        }
        if !def.rotation_hours.is_finite() {
            return fault(DefinitionFault::BadRotationPeriod(def.rotation_hours));
        }
        if !def.tilt_degrees.is_finite() {
            return fault(DefinitionFault::BadTilt(def.tilt_degrees));
        }
        if !(def.distance >= 0.0 && def.distance.is_finite()) {
            return fault(DefinitionFault::BadDistance(def.distance));
        }
        if by_name.insert(def.name.clone(), BodyId(i as u32)).is_some() {
            return fault(DefinitionFault::DuplicateName);
        }

        if def.kind == BodyKind::Star {
            if star_seen {
                return fault(DefinitionFault::MultipleStars);
            }
            if def.parent.is_some() {
                return fault(DefinitionFault::StarWithParent);
            }
            if def.orbital_period_days != 0.0 || def.distance != 0.0 {
                return fault(DefinitionFault::StarInMotion);
            }
            star_seen = true;
        }
    }

    if !star_seen {
        return Err(OrreryError::invalid("<roster>", DefinitionFault::MissingStar));
    }

    // Parents can appear anywhere in the roster; kinds strictly descend
    // (star → planet → moon), which rules out cycles.
    for def in defs {
        let Some(expected) = def.kind.parent_kind() else { continue };
        let Some(parent_name) = def.parent.as_deref() else {
            return Err(OrreryError::invalid(&def.name, DefinitionFault::MissingParent(def.kind)));
        };
        let Some(&parent_id) = by_name.get(parent_name) else {
            return Err(OrreryError::invalid(
                &def.name,
                DefinitionFault::UnknownParent(parent_name.to_owned()),
            ));
        };
        let parent_kind = defs[parent_id.index()].kind;
        if parent_kind != expected {
            return Err(OrreryError::invalid(
                &def.name,
                DefinitionFault::ParentKindMismatch { child: def.kind, parent: parent_kind },
            ));
        }
    }

    Ok(by_name)
}
