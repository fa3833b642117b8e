use crate::api::orrery::Orrery;
use crate::bridge::protocol::*;
use crate::renderer::instance::{affine_to_cols, BodyInstance, FrameBuffer, OrbitPathInstance};

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

/// Build the frame buffer from the orrery's current state.
/// Bodies are written in pre-order; orbit paths only when they are visible.
pub fn build_frame_buffer(orrery: &Orrery, buffer: &mut FrameBuffer) {
    buffer.clear();

    let tree = orrery.tree();
    let pulse = orrery.pulse();
    let now_ms = orrery.now_ms();
    let view = orrery.view();
    let transforms = tree.world_transforms();

    for body in tree.all_bodies() {
        let id = body.id();
        let (ring_inner, ring_outer, ring_color) = match body.ring() {
            Some(ring) => (ring.inner as f32, ring.outer as f32, ring.color as f32),
            None => (0.0, 0.0, 0.0),
        };
        buffer.push_body(BodyInstance {
            world: affine_to_cols(&transforms[id.index()]),
            radius: body.radius() as f32,
            pulse_scale: pulse.scale_at(id, now_ms) as f32,
            kind: body.kind().code(),
            color: body.color() as f32,
            body_id: id.0 as f32,
            ring_inner,
            ring_outer,
            ring_color,
        });

        if view.orbit_paths && body.orbits() {
            let frame = match body.parent() {
                Some(parent) => tree.child_frame(parent, transforms[parent.index()]),
                None => continue,
            };
            buffer.push_orbit(OrbitPathInstance {
                frame: affine_to_cols(&frame),
                radius: body.distance() as f32,
                body_id: id.0 as f32,
                _pad: [0.0; 2],
            });
        }
    }

    let clock = orrery.clock();
    let camera = orrery.camera();
    let settings = camera.settings();
    let h = &mut buffer.header;

    h[HEADER_FRAME_COUNTER] = orrery.frame_count() as f32;
    h[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    h[HEADER_MAX_BODIES] = tree.len() as f32;
    h[HEADER_BODY_COUNT] = buffer.bodies.len() as f32;
    h[HEADER_ORBIT_COUNT] = buffer.orbits.len() as f32;
    h[HEADER_SHOW_ORBIT_PATHS] = flag(view.orbit_paths);
    h[HEADER_SHOW_LABELS] = flag(view.labels);
    h[HEADER_SHOW_AXES] = flag(view.axes);
    h[HEADER_PAUSED] = flag(clock.is_paused());
    h[HEADER_SPEED] = clock.speed() as f32;
    h[HEADER_ELAPSED_DAYS] = clock.elapsed_days() as f32;
    h[HEADER_CAMERA_POSITION..HEADER_CAMERA_POSITION + 3]
        .copy_from_slice(&camera.position().as_vec3().to_array());
    h[HEADER_CAMERA_TARGET..HEADER_CAMERA_TARGET + 3]
        .copy_from_slice(&camera.target().as_vec3().to_array());
    h[HEADER_TRANSITION_ACTIVE] = flag(orrery.transition().is_active());
    h[HEADER_SELECTED_BODY] = orrery.selection().map_or(-1.0, |s| s.body.0 as f32);
    h[HEADER_FOCUS_TARGET] = orrery
        .focus_target_name()
        .and_then(|name| tree.find(name))
        .map_or(-1.0, |id| id.0 as f32);
    h[HEADER_FOV_Y_DEGREES] = settings.fov_y_degrees as f32;
    h[HEADER_NEAR] = settings.near as f32;
    h[HEADER_FAR] = settings.far as f32;
    h[HEADER_ASPECT] = camera.aspect() as f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::OrreryConfig;
    use crate::input::queue::InputEvent;

    #[test]
    fn default_system_fills_every_body() {
        let mut orrery = Orrery::new(OrreryConfig::default(), 0.0).unwrap();
        orrery.frame(16.0);
        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&orrery, &mut buffer);

        assert_eq!(buffer.body_count(), 10);
        // Every body except the star has an orbit path.
        assert_eq!(buffer.orbit_count(), 9);
        assert_eq!(buffer.header[HEADER_BODY_COUNT], 10.0);
        assert_eq!(buffer.header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(buffer.header[HEADER_SELECTED_BODY], -1.0);
        assert_eq!(buffer.header[HEADER_CAMERA_POSITION + 2], 280.0);

        let sun = &buffer.bodies[0];
        assert_eq!(sun.kind, 0.0);
        assert_eq!(sun.radius, 6.0);
        assert_eq!(sun.color, 0xffdd66 as f32);

        let saturn = buffer
            .bodies
            .iter()
            .find(|b| b.ring_outer > 0.0)
            .unwrap();
        assert_eq!(saturn.ring_inner, 1.2);
        assert_eq!(saturn.ring_outer, 2.2);
    }

    #[test]
    fn hidden_orbit_paths_are_omitted() {
        let mut orrery = Orrery::new(OrreryConfig::default(), 0.0).unwrap();
        orrery.handle(InputEvent::SetOrbitPathsVisible(false), 0.0).unwrap();
        orrery.handle(InputEvent::TogglePause, 0.0).unwrap();
        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&orrery, &mut buffer);
        assert_eq!(buffer.orbit_count(), 0);
        assert_eq!(buffer.header[HEADER_SHOW_ORBIT_PATHS], 0.0);
        assert_eq!(buffer.header[HEADER_PAUSED], 1.0);
    }

    #[test]
    fn world_matrices_match_tree() {
        let orrery = Orrery::new(OrreryConfig::default(), 0.0).unwrap();
        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&orrery, &mut buffer);

        let tree = orrery.tree();
        let earth = tree.find("Earth").unwrap();
        let pos = tree.world_position(earth).as_vec3();
        let instance = buffer
            .bodies
            .iter()
            .find(|b| b.body_id == earth.0 as f32)
            .unwrap();
        assert!((instance.world[12] - pos.x).abs() < 1e-4);
        assert!((instance.world[13] - pos.y).abs() < 1e-4);
        assert!((instance.world[14] - pos.z).abs() < 1e-4);
    }

    #[test]
    fn orbit_frames_match_tree() {
        let orrery = Orrery::new(OrreryConfig::default(), 0.0).unwrap();
        let mut buffer = FrameBuffer::new();
        build_frame_buffer(&orrery, &mut buffer);

        let tree = orrery.tree();
        for name in ["Earth", "Moon"] {
            let id = tree.find(name).unwrap();
            let expected = affine_to_cols(&tree.orbit_frame_of(id));
            let orbit = buffer
                .orbits
                .iter()
                .find(|o| o.body_id == id.0 as f32)
                .unwrap();
            for (a, b) in orbit.frame.iter().zip(expected.iter()) {
                assert!((a - b).abs() < 1e-4, "{name}");
            }
        }
        // Planets orbit in the unrotated ecliptic whatever the star's spin.
        let earth = tree.find("Earth").unwrap();
        let earth_orbit = buffer.orbits.iter().find(|o| o.body_id == earth.0 as f32).unwrap();
        assert_eq!(earth_orbit.frame, affine_to_cols(&glam::DAffine3::IDENTITY));
    }
}
