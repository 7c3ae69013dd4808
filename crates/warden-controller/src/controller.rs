//! First-person player controller

use crate::capabilities::{validate_bindings, MissingBinding};
use crate::config::{CapabilityFlags, ControllerConfig, InputBindings, MovementConfig};
use crate::look::Orientation;
use crate::movement::{ControllerMode, EdgeLatch, MovementState, TickInput};
use crate::notifier::PositionNotifier;
use warden_core::{Result, Vec3};
use warden_physics::CharacterBody;
use warden_runtime::{ActionRegistry, CursorMode, Diagnostics, EventBus, InputState, RuntimeSystem};
use winit::keyboard::KeyCode;

/// Mouse button that captures the pointer
const CAPTURE_BUTTON: u32 = 0;
/// Key that releases the pointer
const RELEASE_KEY: KeyCode = KeyCode::Escape;

/// Drives a character body from player input.
///
/// `on_update` runs once per frame (pointer capture, look, edge latching) and
/// `on_physics_step` once per fixed step (movement and position events).
pub struct PlayerController<B: CharacterBody> {
    body: B,
    speeds: MovementConfig,
    bindings: InputBindings,
    capabilities: CapabilityFlags,
    missing: Vec<MissingBinding>,
    orientation: Orientation,
    movement: MovementState,
    mouse_captured: bool,
    jump_edge: EdgeLatch,
    freefly_edge: EdgeLatch,
    notifier: PositionNotifier,
}

impl<B: CharacterBody> PlayerController<B> {
    /// Build a controller around `body`.
    ///
    /// Bindings are checked against `registry` once, here; capabilities whose
    /// actions are missing stay off for the controller's lifetime.
    pub fn new(
        body: B,
        config: ControllerConfig,
        registry: &impl ActionRegistry,
        bus: Option<EventBus>,
    ) -> Self {
        let mut diagnostics = Diagnostics::new();
        let span = diagnostics.enter_span(
            "PlayerController::new",
            &format!("{:?}", config.capabilities),
        );

        let report = validate_bindings(config.capabilities, &config.input, registry);
        for missing in &report.missing {
            diagnostics.error(&missing.to_string());
        }
        diagnostics.info(&format!("Effective capabilities: {:?}", report.effective));
        let notifier = PositionNotifier::new(bus, &diagnostics);

        diagnostics.exit_span(span);

        let orientation = Orientation::new(body.yaw(), 0.0);
        Self {
            body,
            speeds: config.speeds,
            bindings: config.input,
            capabilities: report.effective,
            missing: report.missing,
            orientation,
            movement: MovementState::new(),
            mouse_captured: false,
            jump_edge: EdgeLatch::default(),
            freefly_edge: EdgeLatch::default(),
            notifier,
        }
    }

    /// Input phase: pointer capture, look and edge latching
    pub fn on_update(&mut self, input: &mut InputState, _dt: f32) {
        if input.is_mouse_button_just_pressed(CAPTURE_BUTTON) {
            self.set_mouse_captured(input, true);
        }
        if input.is_key_just_pressed(RELEASE_KEY) {
            self.set_mouse_captured(input, false);
        }

        if self.mouse_captured {
            let (dx, dy) = input.raw_mouse_delta();
            if dx != 0.0 || dy != 0.0 {
                self.orientation
                    .apply_pointer_delta(dx as f32, dy as f32, self.speeds.look_speed);
                self.body.set_yaw(self.orientation.yaw());
            }
        }

        if self.capabilities.can_jump {
            self.jump_edge
                .record(input.is_action_just_pressed(&self.bindings.jump));
        }
        if self.capabilities.can_freefly {
            self.freefly_edge
                .record(input.is_action_just_pressed(&self.bindings.freefly));
        }
    }

    /// Physics phase: one movement tick, then a position event if movement was commanded
    pub fn on_physics_step(&mut self, input: &InputState, dt: f32) {
        let b = &self.bindings;
        let tick = TickInput {
            direction: input.get_vector(&b.left, &b.right, &b.forward, &b.back),
            jump_pressed: self.jump_edge.take(),
            sprint_held: self.capabilities.can_sprint && input.is_action_pressed(&b.sprint),
            freefly_toggled: self.freefly_edge.take(),
        };

        let outcome = self.movement.physics_step(
            &mut self.body,
            &tick,
            &self.speeds,
            self.capabilities,
            &self.orientation,
            dt,
        );
        self.notifier.notify(outcome, self.body.position());
    }

    fn set_mouse_captured(&mut self, input: &mut InputState, captured: bool) {
        if self.mouse_captured == captured {
            return;
        }
        self.mouse_captured = captured;
        input.set_cursor_mode(if captured {
            CursorMode::Captured
        } else {
            CursorMode::Visible
        });
        tracing::debug!(captured, "Pointer capture changed");
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn look_direction(&self) -> Vec3 {
        self.orientation.look_direction()
    }

    pub fn mode(&self) -> ControllerMode {
        self.movement.mode
    }

    pub fn velocity(&self) -> Vec3 {
        self.movement.velocity
    }

    pub fn position(&self) -> Vec3 {
        self.body.position()
    }

    /// Capabilities in effect after binding validation
    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    /// Bindings that were missing at construction
    pub fn missing_bindings(&self) -> &[MissingBinding] {
        &self.missing
    }

    pub fn is_mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    pub fn position_events_emitted(&self) -> u64 {
        self.notifier.emitted()
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

impl<B: CharacterBody> RuntimeSystem for PlayerController<B> {
    fn initialize(&mut self, _input: &InputState) -> Result<()> {
        tracing::info!(
            capabilities = ?self.capabilities,
            position = ?self.body.position(),
            "Player controller ready"
        );
        Ok(())
    }

    fn update(&mut self, input: &mut InputState, dt: f64) -> Result<()> {
        self.on_update(input, dt as f32);
        Ok(())
    }

    fn fixed_update(&mut self, input: &InputState, dt: f64) -> Result<()> {
        self.on_physics_step(input, dt as f32);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        tracing::info!(
            position = ?self.body.position(),
            events = self.notifier.emitted(),
            "Player controller stopped"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "player_controller"
    }
}
