/// Input event types the orrery understands.
/// UI controls and pointer/camera gestures, already converted to engine units.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Simulated days per real second (negative clamps to 0).
    SetSpeed(f64),
    SetPaused(bool),
    TogglePause,
    /// Smoothly move the camera to a body by name. The star's name selects the overview.
    Focus(String),
    /// Smoothly return the camera to its home pose.
    ResetCamera,
    SetOrbitPathsVisible(bool),
    SetLabelsVisible(bool),
    SetAxesVisible(bool),
    /// A click/tap at normalized device coordinates ([-1, 1]², +y up).
    PointerDown { x: f64, y: f64 },
    /// Orbit the camera around its target, in radians.
    Orbit { yaw: f64, pitch: f64 },
    /// Scale the camera's distance to its target.
    Dolly { factor: f64 },
    /// Slide the camera and its target, in world units.
    Pan { dx: f64, dy: f64 },
    /// Viewport size in pixels.
    Resize { width: f64, height: f64 },
}

impl InputEvent {
    /// Interactive camera gestures, ignored while a transition is running.
    pub fn is_camera_gesture(&self) -> bool {
        matches!(
            self,
            InputEvent::Orbit { .. } | InputEvent::Dolly { .. } | InputEvent::Pan { .. }
        )
    }
}

/// A queue of input events.
/// JS writes events into the queue between frames; the frame loop drains it.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
