//! Headless session: a Rapier ground slab, the player controller and any
//! channel actuators, driven frame by frame from a script

use crate::map::MapTracker;
use crate::script::{Script, ScriptStep};
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;
use warden_controller::{ControllerConfig, ControllerMode, PlayerController};
use warden_core::{Result, Vec3};
use warden_physics::{CapsuleShape, PhysicsWorld, RapierCharacterBody};
use warden_runtime::{
    AnimationTarget, Binding, ChannelActuator, EventBus, FrameLoop, GameEvent, InputConfig,
    InputState,
};

const GROUND_CENTER: Vec3 = Vec3::new(0.0, -0.5, 0.0);
const GROUND_HALF_EXTENTS: Vec3 = Vec3::new(100.0, 0.5, 100.0);

/// Load controller settings and input actions from one TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<(ControllerConfig, InputConfig)> {
    let source = std::fs::read_to_string(path)?;
    let controller = ControllerConfig::from_toml_str(&source)?;
    let input = InputConfig::from_toml_str(&source)?;
    Ok((controller, input))
}

/// Animation player that records what it was asked to play
#[derive(Debug, Default)]
pub struct AnimationLog {
    /// `(animation, forward)` in call order
    pub played: Vec<(String, bool)>,
}

impl AnimationTarget for AnimationLog {
    fn play(&mut self, animation: &str) {
        tracing::info!(animation, "Playing animation");
        self.played.push((animation.to_string(), true));
    }

    fn play_backwards(&mut self, animation: &str) {
        tracing::info!(animation, "Playing animation backwards");
        self.played.push((animation.to_string(), false));
    }
}

/// Final state of an actuator
#[derive(Debug, Clone, PartialEq)]
pub struct ActuatorSummary {
    pub channel: String,
    pub is_open: bool,
    pub plays: usize,
}

/// Where the session ended up
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub frames: u64,
    pub fixed_steps: u64,
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub mode: ControllerMode,
    pub mouse_captured: bool,
    pub position_events: u64,
    pub map_marker: Option<(f32, f32)>,
    pub actuators: Vec<ActuatorSummary>,
}

pub struct Simulation {
    input: InputState,
    bus: EventBus,
    frame_loop: FrameLoop,
    controller: PlayerController<RapierCharacterBody>,
    actuators: Vec<Rc<RefCell<ChannelActuator<AnimationLog>>>>,
    map: Rc<RefCell<MapTracker>>,
    held: HashSet<Binding>,
    frames: u64,
    fixed_steps: u64,
}

impl Simulation {
    pub fn new(
        config: ControllerConfig,
        input_config: &InputConfig,
        script: &Script,
    ) -> Result<Self> {
        let mut input = InputState::new();
        input_config.apply(&mut input)?;

        let bus = EventBus::new();

        let mut world = PhysicsWorld::new();
        world.add_static_cuboid(GROUND_CENTER, GROUND_HALF_EXTENTS);
        let body = RapierCharacterBody::new(
            world,
            Vec3::from_array(script.spawn),
            CapsuleShape::default(),
        );

        let controller = PlayerController::new(body, config, &input, Some(bus.clone()));

        let actuators = script
            .actuators
            .iter()
            .map(|entry| {
                let actuator = ChannelActuator::new(
                    entry.channel.as_str(),
                    entry.animation.as_str(),
                    entry.policy,
                    AnimationLog::default(),
                );
                actuator.connect(Some(&bus)).0
            })
            .collect();

        let (map, _) = MapTracker::new(script.map).connect(&bus);

        Ok(Self {
            input,
            bus,
            frame_loop: FrameLoop::default(),
            controller,
            actuators,
            map,
            held: HashSet::new(),
            frames: 0,
            fixed_steps: 0,
        })
    }

    pub fn controller(&self) -> &PlayerController<RapierCharacterBody> {
        &self.controller
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Replay every step of `script`
    pub fn run_script(&mut self, script: &Script, frame_dt: f64) -> Result<()> {
        for step in &script.steps {
            self.run_step(step, frame_dt)?;
        }
        Ok(())
    }

    pub fn run_step(&mut self, step: &ScriptStep, frame_dt: f64) -> Result<()> {
        let hold: HashSet<Binding> = step.held_bindings()?.into_iter().collect();
        self.set_held(&hold);

        let taps: Vec<Binding> = step
            .pressed_bindings()?
            .into_iter()
            .filter(|binding| !self.held.contains(binding))
            .collect();

        for frame in 0..step.frames {
            if frame == 0 {
                for &binding in &taps {
                    press(&mut self.input, binding);
                }
                if let Some([dx, dy]) = step.mouse {
                    self.input.process_mouse_raw_delta(dx, dy);
                }
                for signal in &step.signals {
                    self.bus
                        .publish(&GameEvent::signal(signal.channel.as_str(), signal.active));
                }
            }

            self.run_frame(frame_dt)?;

            if frame == 0 {
                for &binding in &taps {
                    release(&mut self.input, binding);
                }
            }
        }
        Ok(())
    }

    /// Release everything and run frames until `total` frames have elapsed
    pub fn run_idle_until(&mut self, total: u64, frame_dt: f64) -> Result<()> {
        self.set_held(&HashSet::new());
        while self.frames < total {
            self.run_frame(frame_dt)?;
        }
        Ok(())
    }

    fn run_frame(&mut self, frame_dt: f64) -> Result<()> {
        let stats = self
            .frame_loop
            .run_frame(&mut self.input, frame_dt, &mut [&mut self.controller])?;
        self.frames += 1;
        self.fixed_steps += stats.fixed_steps as u64;
        Ok(())
    }

    fn set_held(&mut self, hold: &HashSet<Binding>) {
        for &binding in self.held.difference(hold) {
            release(&mut self.input, binding);
        }
        for &binding in hold.difference(&self.held) {
            press(&mut self.input, binding);
        }
        self.held = hold.clone();
    }

    pub fn report(&self) -> SimulationReport {
        let orientation = self.controller.orientation();
        SimulationReport {
            frames: self.frames,
            fixed_steps: self.fixed_steps,
            position: self.controller.position(),
            yaw: orientation.yaw(),
            pitch: orientation.pitch(),
            mode: self.controller.mode(),
            mouse_captured: self.controller.is_mouse_captured(),
            position_events: self.map.borrow().updates(),
            map_marker: self.map.borrow().marker(),
            actuators: self
                .actuators
                .iter()
                .map(|actuator| {
                    let actuator = actuator.borrow();
                    ActuatorSummary {
                        channel: actuator.channel().to_string(),
                        is_open: actuator.is_open(),
                        plays: actuator.target().played.len(),
                    }
                })
                .collect(),
        }
    }

    /// Shut the controller down and return the final report
    pub fn finish(mut self) -> Result<SimulationReport> {
        self.frame_loop.shutdown(&mut [&mut self.controller])?;
        Ok(self.report())
    }
}

fn press(input: &mut InputState, binding: Binding) {
    match binding {
        Binding::Key(key) => input.process_key_down(key),
        Binding::Mouse(button) => input.process_mouse_button_down(button),
    }
}

fn release(input: &mut InputState, binding: Binding) {
    match binding {
        Binding::Key(key) => input.process_key_up(key),
        Binding::Mouse(button) => input.process_mouse_button_up(button),
    }
}
