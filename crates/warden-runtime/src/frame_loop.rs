//! Host-side scheduler that drives systems in update → fixed_update order

use crate::clock::GameClock;
use crate::input::InputState;
use crate::system::RuntimeSystem;
use warden_core::Result;

/// What happened during one call to [`FrameLoop::run_frame`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of fixed physics steps executed this frame
    pub fixed_steps: u32,
    /// True if the frame was skipped because the loop is paused
    pub skipped: bool,
}

/// Runs registered systems once per frame.
///
/// Systems are borrowed per call rather than owned, so the host keeps typed
/// access to them between frames.
pub struct FrameLoop {
    pub clock: GameClock,
    paused: bool,
    initialized: bool,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new(GameClock::new())
    }
}

impl FrameLoop {
    pub fn new(clock: GameClock) -> Self {
        Self {
            clock,
            paused: false,
            initialized: false,
        }
    }

    /// While paused, frames are not delivered to any system
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Initialize every system once, in order
    pub fn initialize(
        &mut self,
        input: &InputState,
        systems: &mut [&mut dyn RuntimeSystem],
    ) -> Result<()> {
        for system in systems.iter_mut() {
            tracing::debug!(system = system.name(), "Initializing system");
            system.initialize(input)?;
        }
        self.initialized = true;
        Ok(())
    }

    /// Run one frame: every system's `update`, then as many fixed steps as the
    /// accumulated time allows. Per-frame input edges are cleared afterwards.
    pub fn run_frame(
        &mut self,
        input: &mut InputState,
        frame_dt: f64,
        systems: &mut [&mut dyn RuntimeSystem],
    ) -> Result<FrameStats> {
        if !self.initialized {
            self.initialize(input, systems)?;
        }

        if self.paused {
            input.end_frame();
            return Ok(FrameStats {
                fixed_steps: 0,
                skipped: true,
            });
        }

        self.clock.advance(frame_dt);

        for system in systems.iter_mut() {
            system.update(input, self.clock.delta_time)?;
        }

        let mut stats = FrameStats::default();
        while self.clock.should_fixed_update() {
            for system in systems.iter_mut() {
                system.fixed_update(input, self.clock.fixed_timestep)?;
            }
            self.clock.consume_fixed_step();
            stats.fixed_steps += 1;
        }

        input.end_frame();
        Ok(stats)
    }

    /// Shut every system down, in reverse registration order
    pub fn shutdown(&mut self, systems: &mut [&mut dyn RuntimeSystem]) -> Result<()> {
        for system in systems.iter_mut().rev() {
            system.shutdown()?;
        }
        Ok(())
    }
}
