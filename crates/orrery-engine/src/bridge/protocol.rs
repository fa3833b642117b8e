//! Frame buffer wire layout.
//! Must stay in sync with the TypeScript renderer's `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 24 floats]
//! [Bodies: max_bodies × 24 floats]
//! [Orbit paths: max_bodies × 20 floats]
//! ```
//!
//! Capacities are fixed when the orrery is built (the roster never changes),
//! so TypeScript can compute offsets once from the header.

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 24;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 0;
pub const HEADER_PROTOCOL_VERSION: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_ORBIT_COUNT: usize = 4;
pub const HEADER_SHOW_ORBIT_PATHS: usize = 5;
pub const HEADER_SHOW_LABELS: usize = 6;
pub const HEADER_SHOW_AXES: usize = 7;
pub const HEADER_PAUSED: usize = 8;
pub const HEADER_SPEED: usize = 9;
pub const HEADER_ELAPSED_DAYS: usize = 10;
/// Camera position x, y, z.
pub const HEADER_CAMERA_POSITION: usize = 11;
/// Camera look target x, y, z.
pub const HEADER_CAMERA_TARGET: usize = 14;
pub const HEADER_TRANSITION_ACTIVE: usize = 17;
/// BodyId of the selection, or -1.
pub const HEADER_SELECTED_BODY: usize = 18;
/// BodyId shown in the UI target selector, or -1.
pub const HEADER_FOCUS_TARGET: usize = 19;
pub const HEADER_FOV_Y_DEGREES: usize = 20;
pub const HEADER_NEAR: usize = 21;
pub const HEADER_FAR: usize = 22;
pub const HEADER_ASPECT: usize = 23;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per body instance (wire format, never changes).
pub const BODY_INSTANCE_FLOATS: usize = 24;

/// Floats per orbit path instance (wire format, never changes).
pub const ORBIT_INSTANCE_FLOATS: usize = 20;

/// Section sizes and offsets for a given body capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,

    /// Size of body data section in floats.
    pub body_data_floats: usize,
    /// Size of orbit path data section in floats.
    pub orbit_data_floats: usize,

    /// Offset (in floats) where body data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where orbit path data begins.
    pub orbit_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize) -> Self {
        let body_data_floats = max_bodies * BODY_INSTANCE_FLOATS;
        let orbit_data_floats = max_bodies * ORBIT_INSTANCE_FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let orbit_data_offset = body_data_offset + body_data_floats;

        let buffer_total_floats = orbit_data_offset + orbit_data_floats;

        Self {
            max_bodies,
            body_data_floats,
            orbit_data_floats,
            body_data_offset,
            orbit_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }
}
