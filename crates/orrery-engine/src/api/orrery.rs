use glam::{DVec2, DVec3};

use crate::api::config::OrreryConfig;
use crate::api::error::OrreryError;
use crate::api::types::{BodyId, FrameReport};
use crate::core::body::BodyKind;
use crate::core::time::SimulationClock;
use crate::core::tree::BodyTree;
use crate::extensions::pulse::SelectionPulse;
use crate::extensions::transition::CameraTransition;
use crate::input::picking::{pick, SelectionResult};
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::camera::{CameraPose, CameraRig};

/// Cosmetic toggles. No kinematic effect; passed through to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFlags {
    pub orbit_paths: bool,
    pub labels: bool,
    pub axes: bool,
}

/// The whole orrery: bodies, clock, camera and selection, driven by `frame`.
pub struct Orrery {
    config: OrreryConfig,
    tree: BodyTree,
    clock: SimulationClock,
    camera: CameraRig,
    transition: CameraTransition,
    pulse: SelectionPulse,
    selection: Option<SelectionResult>,
    /// Body the UI target selector should show.
    focus_target: Option<BodyId>,
    view: ViewFlags,
    frame_count: u64,
    /// Timestamp of the latest frame (or construction), in milliseconds.
    now_ms: f64,
}

impl Orrery {
    /// Build the body tree and place the camera at its home pose.
    /// Fails if any body definition is invalid.
    pub fn new(config: OrreryConfig, now_ms: f64) -> Result<Self, OrreryError> {
        let tree = BodyTree::new(&config.bodies, config.phase_seed)?;

        let mut clock = SimulationClock::new(config.speed_days_per_second, now_ms)
            .with_max_frame_seconds(config.max_frame_seconds);
        clock.set_paused(config.start_paused);

        let camera = CameraRig::new(config.home_pose, config.camera);
        let view = ViewFlags {
            orbit_paths: config.show_orbit_paths,
            labels: config.show_labels,
            axes: config.show_axes,
        };

        log::info!(
            "orrery: ready, {} bodies at {} days/s{}",
            tree.len(),
            clock.speed(),
            if clock.is_paused() { " (paused)" } else { "" }
        );

        Ok(Self {
            config,
            tree,
            clock,
            camera,
            transition: CameraTransition::Idle,
            pulse: SelectionPulse::default(),
            selection: None,
            focus_target: None,
            view,
            frame_count: 0,
            now_ms,
        })
    }

    /// One frame: tick the clock, advance the bodies, step the camera
    /// transition and the selection pulse.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        self.now_ms = now_ms;
        self.frame_count += 1;

        let delta_days = self.clock.tick(now_ms);
        self.tree.advance(delta_days);

        if let Some(pose) = self.transition.step(now_ms) {
            self.camera.set_pose(pose);
        }
        self.pulse.step(now_ms);

        FrameReport {
            delta_days,
            transition_active: self.transition.is_active(),
        }
    }

    /// Apply every queued event at `now_ms`, in arrival order.
    /// Recoverable rejections are logged and skipped.
    pub fn apply_queue(&mut self, queue: &mut InputQueue, now_ms: f64) {
        for event in queue.drain() {
            if let Err(err) = self.handle(event, now_ms) {
                log::debug!("orrery: event rejected: {}", err);
            }
        }
    }

    /// Apply one UI or pointer event.
    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> Result<(), OrreryError> {
        if event.is_camera_gesture() && self.transition.is_active() {
            log::trace!("orrery: ignoring {:?} during camera transition", event);
            return Ok(());
        }

        match event {
            InputEvent::SetSpeed(speed) => self.clock.set_speed(speed),
            InputEvent::SetPaused(paused) => {
                self.clock.set_paused(paused);
                log::debug!("orrery: paused = {}", paused);
            }
            InputEvent::TogglePause => {
                let paused = self.clock.toggle_pause();
                log::debug!("orrery: paused = {}", paused);
            }
            InputEvent::Focus(name) => self.focus(&name, now_ms)?,
            InputEvent::ResetCamera => self.reset_camera(now_ms),
            InputEvent::SetOrbitPathsVisible(v) => self.view.orbit_paths = v,
            InputEvent::SetLabelsVisible(v) => self.view.labels = v,
            InputEvent::SetAxesVisible(v) => self.view.axes = v,
            InputEvent::PointerDown { x, y } => {
                self.pointer_down(DVec2::new(x, y), now_ms);
            }
            InputEvent::Orbit { yaw, pitch } => self.camera.orbit(yaw, pitch),
            InputEvent::Dolly { factor } => self.camera.dolly(factor),
            InputEvent::Pan { dx, dy } => self.camera.pan(dx, dy),
            InputEvent::Resize { width, height } => self.camera.resize(width, height),
        }
        Ok(())
    }

    /// Start a camera move toward the named body, or to the overview pose
    /// for the star. Unknown names leave the camera where it is.
    pub fn focus(&mut self, name: &str, now_ms: f64) -> Result<(), OrreryError> {
        let Some(id) = self.tree.find(name) else {
            log::warn!("orrery: focus on unknown body `{}`", name);
            return Err(OrreryError::FocusUnknownTarget(name.to_string()));
        };

        let to = self.focus_pose(id);
        self.transition
            .focus_request(self.camera.pose(), to, now_ms, self.config.focus_duration_ms);
        // Moons show as their planet in the target selector; the star stays itself.
        self.focus_target = Some(self.tree.owning_planet(id).unwrap_or(id));
        log::debug!("orrery: focusing {}", name);
        Ok(())
    }

    /// Camera pose that frames `id` from the current viewing direction.
    pub fn focus_pose(&self, id: BodyId) -> CameraPose {
        let body = self.tree.body(id);
        if body.kind() == BodyKind::Star {
            return self.config.overview_pose;
        }
        let center = self.tree.world_position(id);
        let back = self.camera.pose().back_direction().unwrap_or(DVec3::Z);
        let distance = self.config.focus_distance(body.radius());
        CameraPose::new(center + back * distance, center)
    }

    /// Smoothly return the camera to its home pose.
    pub fn reset_camera(&mut self, now_ms: f64) {
        self.transition.focus_request(
            self.camera.pose(),
            self.config.home_pose,
            now_ms,
            self.config.focus_duration_ms,
        );
        log::debug!("orrery: camera reset");
    }

    /// Pick at `ndc`. A hit replaces the selection and pulses the body;
    /// a miss changes nothing.
    pub fn pointer_down(&mut self, ndc: DVec2, now_ms: f64) -> Option<&SelectionResult> {
        let hit = pick(ndc, &self.camera, &self.tree)?;
        log::debug!("orrery: selected {}", hit.describe());
        self.pulse.start(hit.body, now_ms);
        self.focus_target = hit.owning_planet.or(Some(hit.body));
        self.selection = Some(hit);
        self.selection.as_ref()
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn tree(&self) -> &BodyTree {
        &self.tree
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn transition(&self) -> &CameraTransition {
        &self.transition
    }

    pub fn pulse(&self) -> &SelectionPulse {
        &self.pulse
    }

    pub fn selection(&self) -> Option<&SelectionResult> {
        self.selection.as_ref()
    }

    /// Name for the UI target selector: a planet, or a moon's planet.
    pub fn focus_target_name(&self) -> Option<&str> {
        self.focus_target.map(|id| self.tree.body(id).name())
    }

    pub fn view(&self) -> ViewFlags {
        self.view
    }

    pub fn config(&self) -> &OrreryConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
