//! Channel actuators: entities that animate when their channel is signalled
//!
//! Gates, vents and similar props all follow the same shape: subscribe to a
//! named channel on the event bus, then play a pre-authored animation forward
//! on activation and backwards on deactivation.

use crate::event::GameEvent;
use crate::event_bus::{EventBus, Subscription};
use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;

/// The animation player an actuator drives
pub trait AnimationTarget {
    fn play(&mut self, animation: &str);
    fn play_backwards(&mut self, animation: &str);
}

/// How an actuator reacts to repeated signals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActuationPolicy {
    /// Every signal plays, even if the state does not change (gates)
    #[default]
    Always,
    /// Only open→closed and closed→open transitions play (vents)
    Latched,
}

/// Plays or reverses one animation in response to a named channel
pub struct ChannelActuator<T> {
    channel: String,
    animation: String,
    policy: ActuationPolicy,
    is_open: bool,
    target: T,
}

impl<T: AnimationTarget> ChannelActuator<T> {
    pub fn new(
        channel: impl Into<String>,
        animation: impl Into<String>,
        policy: ActuationPolicy,
        target: T,
    ) -> Self {
        Self {
            channel: channel.into(),
            animation: animation.into(),
            policy,
            is_open: false,
            target,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// React to an activate/deactivate signal
    pub fn on_signal(&mut self, active: bool) {
        let changed = active != self.is_open;
        if changed || self.policy == ActuationPolicy::Always {
            if active {
                self.target.play(&self.animation);
            } else {
                self.target.play_backwards(&self.animation);
            }
        }
        self.is_open = active;
        tracing::info!(channel = %self.channel, active, "Received signal");
    }
}

impl<T: AnimationTarget + 'static> ChannelActuator<T> {
    /// Subscribe the actuator to its channel.
    ///
    /// Without a bus the actuator stays inert; this is logged, not returned as an error.
    pub fn connect(self, bus: Option<&EventBus>) -> (Rc<RefCell<Self>>, Option<Subscription>) {
        let actuator = Rc::new(RefCell::new(self));
        let Some(bus) = bus else {
            tracing::error!(
                channel = %actuator.borrow().channel,
                "Actuator could not find the event bus"
            );
            return (actuator, None);
        };

        let channel = actuator.borrow().channel.clone();
        let listener = Rc::clone(&actuator);
        let subscription = bus.subscribe(channel, move |event| {
            if let GameEvent::Signal { active, .. } = event {
                listener.borrow_mut().on_signal(*active);
            }
        });
        (actuator, Some(subscription))
    }
}
