use serde::{Deserialize, Serialize};

/// Handle to a body in the tree arena. Only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl BodyId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Summary of one frame of the orrery loop.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Simulated days the bodies advanced this frame.
    pub delta_days: f64,
    /// Whether a camera transition is still in flight after this frame.
    pub transition_active: bool,
}
