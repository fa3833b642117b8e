use glam::DVec2;
use orrery_engine::{
    build_frame_buffer, FrameBuffer, FrameReport, InputEvent, InputQueue, Orrery, OrreryConfig,
    OrreryError, ProtocolLayout,
};

/// Convert a pointer position in pixels (origin top-left) to normalized
/// device coordinates ([-1, 1]², +y up). A degenerate viewport maps to the centre.
pub fn pointer_to_ndc(px: f64, py: f64, width: f64, height: f64) -> DVec2 {
    if !(width > 0.0 && height > 0.0) {
        return DVec2::ZERO;
    }
    DVec2::new(2.0 * px / width - 1.0, 1.0 - 2.0 * py / height)
}

/// Owns the orrery plus the per-frame plumbing the browser talks to.
///
/// UI callbacks push events between frames; `tick` applies them, runs the
/// frame and rebuilds the buffers JS reads through the pointer accessors.
pub struct OrreryRunner {
    orrery: Orrery,
    input: InputQueue,
    frame_buffer: FrameBuffer,
    layout: ProtocolLayout,
    /// Header + bodies + orbit paths in one flat buffer, laid out by `layout`.
    packed: Vec<f32>,
}

impl OrreryRunner {
    pub fn new(config: OrreryConfig, now_ms: f64) -> Result<Self, OrreryError> {
        let orrery = Orrery::new(config, now_ms)?;
        let max_bodies = orrery.tree().len();
        let layout = ProtocolLayout::new(max_bodies);

        let mut runner = Self {
            orrery,
            input: InputQueue::new(),
            frame_buffer: FrameBuffer::with_capacity(max_bodies),
            packed: Vec::with_capacity(layout.buffer_total_floats),
            layout,
        };
        runner.rebuild_buffers();
        Ok(runner)
    }

    /// Build from a JSON config (empty string for the defaults).
    pub fn from_json(config_json: &str, now_ms: f64) -> Result<Self, OrreryError> {
        let config = if config_json.trim().is_empty() {
            OrreryConfig::default()
        } else {
            OrreryConfig::from_json(config_json)?
        };
        Self::new(config, now_ms)
    }

    /// Queue an event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue a focus request. Returns false (and queues nothing) for unknown names.
    pub fn request_focus(&mut self, name: &str) -> bool {
        if self.orrery.tree().find(name).is_none() {
            log::warn!("focus: no body named `{}`", name);
            return false;
        }
        self.input.push(InputEvent::Focus(name.to_string()));
        true
    }

    /// Run one frame: apply queued input, advance, rebuild the buffers.
    pub fn tick(&mut self, now_ms: f64) -> FrameReport {
        self.orrery.apply_queue(&mut self.input, now_ms);
        let report = self.orrery.frame(now_ms);
        self.rebuild_buffers();
        report
    }

    fn rebuild_buffers(&mut self) {
        build_frame_buffer(&self.orrery, &mut self.frame_buffer);
        self.frame_buffer.pack_into(&self.layout, &mut self.packed);
    }

    pub fn orrery(&self) -> &Orrery {
        &self.orrery
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.packed.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.frame_buffer.header_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.frame_buffer.bodies_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.frame_buffer.body_count()
    }

    pub fn orbits_ptr(&self) -> *const f32 {
        self.frame_buffer.orbits_ptr()
    }

    pub fn orbit_count(&self) -> u32 {
        self.frame_buffer.orbit_count()
    }

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    // ---- UI text ----

    /// Body names in `BodyId` order, as a JSON array.
    pub fn body_names_json(&self) -> String {
        let tree = self.orrery.tree();
        let mut names = vec![""; tree.len()];
        for body in tree.all_bodies() {
            names[body.id().index()] = body.name();
        }
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Info line for the current selection, or an empty string.
    pub fn selection_info(&self) -> String {
        self.orrery
            .selection()
            .map(|s| s.describe())
            .unwrap_or_default()
    }

    /// Value for the UI target selector, or an empty string.
    pub fn focus_target(&self) -> String {
        self.orrery.focus_target_name().unwrap_or_default().to_string()
    }
}
