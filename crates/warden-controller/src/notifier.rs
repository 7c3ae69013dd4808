//! Announces player movement on the event bus

use crate::movement::TickOutcome;
use warden_core::Vec3;
use warden_runtime::{Diagnostics, EventBus, GameEvent};

/// Publishes `position_changed(x, z)` after grounded ticks that commanded motion.
///
/// Emission follows the commanded horizontal velocity, not the actual
/// displacement: a move blocked by a wall is still announced.
pub struct PositionNotifier {
    bus: Option<EventBus>,
    emitted: u64,
}

impl PositionNotifier {
    /// A missing bus is logged once and leaves the notifier inert
    pub fn new(bus: Option<EventBus>, diagnostics: &Diagnostics) -> Self {
        if bus.is_none() {
            diagnostics.error("Event bus not available; position updates will not be published");
        }
        Self { bus, emitted: 0 }
    }

    pub fn has_bus(&self) -> bool {
        self.bus.is_some()
    }

    /// Number of position events published so far
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Publish the body's planar position if this tick should be announced.
    /// Returns true if an event was published.
    pub fn notify(&mut self, outcome: TickOutcome, position: Vec3) -> bool {
        let TickOutcome::Slid {
            commanded_move: true,
        } = outcome
        else {
            return false;
        };
        let Some(bus) = &self.bus else {
            return false;
        };

        bus.publish(&GameEvent::PositionChanged {
            x: position.x,
            z: position.z,
        });
        self.emitted += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use warden_runtime::POSITION_CHANGED;

    fn recording_bus() -> (EventBus, Rc<RefCell<Vec<GameEvent>>>) {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(POSITION_CHANGED, move |event| sink.borrow_mut().push(event.clone()));
        (bus, seen)
    }

    #[test]
    fn test_emits_planar_coordinates() {
        let (bus, seen) = recording_bus();
        let mut notifier = PositionNotifier::new(Some(bus), &Diagnostics::new());

        let sent = notifier.notify(
            TickOutcome::Slid {
                commanded_move: true,
            },
            Vec3::new(1.5, 9.0, -2.0),
        );

        assert!(sent);
        assert_eq!(notifier.emitted(), 1);
        assert_eq!(
            seen.borrow().as_slice(),
            &[GameEvent::PositionChanged { x: 1.5, z: -2.0 }]
        );
    }

    #[test]
    fn test_silent_without_commanded_move() {
        let (bus, seen) = recording_bus();
        let mut notifier = PositionNotifier::new(Some(bus), &Diagnostics::new());

        assert!(!notifier.notify(
            TickOutcome::Slid {
                commanded_move: false
            },
            Vec3::ZERO
        ));
        assert!(!notifier.notify(TickOutcome::Flew, Vec3::new(5.0, 0.0, 5.0)));
        assert!(seen.borrow().is_empty());
        assert_eq!(notifier.emitted(), 0);
    }

    #[test]
    fn test_missing_bus_is_inert() {
        let mut notifier = PositionNotifier::new(None, &Diagnostics::new());
        assert!(!notifier.has_bus());
        assert!(!notifier.notify(
            TickOutcome::Slid {
                commanded_move: true
            },
            Vec3::ZERO
        ));
    }
}
