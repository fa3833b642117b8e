use bytemuck::{Pod, Zeroable};
use glam::{DAffine3, DMat4};

use crate::bridge::protocol::{
    ProtocolLayout, BODY_INSTANCE_FLOATS, HEADER_BODY_COUNT, HEADER_FLOATS, HEADER_MAX_BODIES,
    HEADER_ORBIT_COUNT, HEADER_PROTOCOL_VERSION, ORBIT_INSTANCE_FLOATS, PROTOCOL_VERSION,
};

/// Column-major 4×4 matrix of an affine transform, narrowed to f32 for the GPU.
pub fn affine_to_cols(transform: &DAffine3) -> [f32; 16] {
    DMat4::from(*transform).as_mat4().to_cols_array()
}

/// Per-body render data. Must match the TypeScript protocol: 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct BodyInstance {
    /// World transform, column-major.
    pub world: [f32; 16],
    pub radius: f32,
    /// Selection pulse multiplier (1.0 at rest).
    pub pulse_scale: f32,
    /// 0 = star, 1 = planet, 2 = moon.
    pub kind: f32,
    /// 0xRRGGBB (exact in f32).
    pub color: f32,
    pub body_id: f32,
    /// Ring radii in multiples of `radius`; both 0 without a ring.
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_color: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = BODY_INSTANCE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One circular orbit path: a circle of `radius` in the XZ plane of `frame`.
/// 20 floats = 80 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct OrbitPathInstance {
    /// Orbit frame (the parent's world transform), column-major.
    pub frame: [f32; 16],
    pub radius: f32,
    pub body_id: f32,
    pub _pad: [f32; 2],
}

impl OrbitPathInstance {
    pub const FLOATS: usize = ORBIT_INSTANCE_FLOATS;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Everything the renderer reads for one frame.
pub struct FrameBuffer {
    pub header: [f32; HEADER_FLOATS],
    pub bodies: Vec<BodyInstance>,
    pub orbits: Vec<OrbitPathInstance>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(16)
    }

    pub fn with_capacity(max_bodies: usize) -> Self {
        Self {
            header: [0.0; HEADER_FLOATS],
            bodies: Vec::with_capacity(max_bodies),
            orbits: Vec::with_capacity(max_bodies),
        }
    }

    pub fn clear(&mut self) {
        self.header = [0.0; HEADER_FLOATS];
        self.bodies.clear();
        self.orbits.clear();
    }

    pub fn push_body(&mut self, instance: BodyInstance) {
        self.bodies.push(instance);
    }

    pub fn push_orbit(&mut self, instance: OrbitPathInstance) {
        self.orbits.push(instance);
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn orbit_count(&self) -> u32 {
        self.orbits.len() as u32
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    /// Raw pointer to body data for direct memory reads from JS.
    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn orbits_ptr(&self) -> *const f32 {
        self.orbits.as_ptr() as *const f32
    }

    /// Copy the frame into one flat buffer laid out by `layout`.
    /// Instances past the layout's capacity are dropped.
    pub fn pack_into(&self, layout: &ProtocolLayout, out: &mut Vec<f32>) {
        out.clear();
        out.resize(layout.buffer_total_floats, 0.0);

        let bodies = &self.bodies[..self.bodies.len().min(layout.max_bodies)];
        let orbits = &self.orbits[..self.orbits.len().min(layout.max_bodies)];

        out[..HEADER_FLOATS].copy_from_slice(&self.header);
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_MAX_BODIES] = layout.max_bodies as f32;
        out[HEADER_BODY_COUNT] = bodies.len() as f32;
        out[HEADER_ORBIT_COUNT] = orbits.len() as f32;

        let body_floats: &[f32] = bytemuck::cast_slice(bodies);
        let start = layout.body_data_offset;
        out[start..start + body_floats.len()].copy_from_slice(body_floats);

        let orbit_floats: &[f32] = bytemuck::cast_slice(orbits);
        let start = layout.orbit_data_offset;
        out[start..start + orbit_floats.len()].copy_from_slice(orbit_floats);
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn instance_sizes_match_protocol() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), BodyInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<OrbitPathInstance>(), OrbitPathInstance::STRIDE_BYTES);
    }

    #[test]
    fn affine_columns_carry_translation() {
        let cols = affine_to_cols(&DAffine3::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(&cols[12..16], &[1.0, 2.0, 3.0, 1.0]);
        assert_eq!(cols[0], 1.0);
    }

    #[test]
    fn pack_places_sections_at_offsets() {
        let layout = ProtocolLayout::new(2);
        let mut frame = FrameBuffer::new();
        frame.push_body(BodyInstance { radius: 6.0, ..Default::default() });
        frame.push_body(BodyInstance { radius: 1.0, ..Default::default() });
        frame.push_body(BodyInstance { radius: 9.0, ..Default::default() });
        frame.push_orbit(OrbitPathInstance { radius: 8.0, ..Default::default() });

        let mut out = Vec::new();
        frame.pack_into(&layout, &mut out);
        assert_eq!(out.len(), layout.buffer_total_floats);
        assert_eq!(out[HEADER_BODY_COUNT], 2.0);
        assert_eq!(out[HEADER_ORBIT_COUNT], 1.0);
        assert_eq!(out[layout.body_data_offset + 16], 6.0);
        assert_eq!(out[layout.body_data_offset + BODY_INSTANCE_FLOATS + 16], 1.0);
        assert_eq!(out[layout.orbit_data_offset + 16], 8.0);
    }
}
