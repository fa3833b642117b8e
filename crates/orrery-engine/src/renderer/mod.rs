pub mod camera;
pub mod instance;

// Re-export key types for convenient access
pub use camera::{CameraPose, CameraRig, CameraSettings};
pub use instance::{BodyInstance, FrameBuffer, OrbitPathInstance};
