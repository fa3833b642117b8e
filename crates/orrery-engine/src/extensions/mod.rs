// extensions/mod.rs
//
// Time-based animations layered over the camera and the selection.
// Both are plain state machines stepped by the frame loop with a wall timestamp.

pub mod easing;
pub mod pulse;
pub mod transition;

pub use easing::{Easing, lerp, lerp_dvec3, ease_dvec3};
pub use pulse::SelectionPulse;
pub use transition::{ActiveTransition, CameraTransition};
