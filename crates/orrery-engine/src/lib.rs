pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod assets;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::config::OrreryConfig;
pub use api::error::{DefinitionFault, OrreryError};
pub use api::orrery::{Orrery, ViewFlags};
pub use api::types::{BodyId, FrameReport};
pub use core::body::{Body, BodyDef, BodyKind, RingDef};
pub use core::time::SimulationClock;
pub use core::tree::BodyTree;
pub use renderer::camera::{CameraPose, CameraRig, CameraSettings};
pub use renderer::instance::{BodyInstance, FrameBuffer, OrbitPathInstance};
pub use input::picking::{pick, Ray, SelectionResult};
pub use input::queue::{InputEvent, InputQueue};
pub use assets::roster::solar_system;
pub use bridge::protocol::ProtocolLayout;
pub use systems::render::build_frame_buffer;

// Extensions: animations stepped by the frame loop
pub use extensions::{
    Easing, lerp, lerp_dvec3, ease_dvec3,
    CameraTransition, ActiveTransition, SelectionPulse,
};
