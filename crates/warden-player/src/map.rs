//! Player marker on an overhead map

use serde::Deserialize;
use std::cell::RefCell;
use std::rc::Rc;
use warden_core::inverse_lerp;
use warden_runtime::{EventBus, GameEvent, Subscription, POSITION_CHANGED};

/// World-space rectangle the map covers
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            min_x: -50.0,
            max_x: 50.0,
            min_z: -50.0,
            max_z: 50.0,
        }
    }
}

/// Keeps the last reported player position and projects it onto the map
#[derive(Debug, Clone)]
pub struct MapTracker {
    bounds: MapBounds,
    last_position: Option<(f32, f32)>,
    updates: u64,
}

impl MapTracker {
    pub fn new(bounds: MapBounds) -> Self {
        Self {
            bounds,
            last_position: None,
            updates: 0,
        }
    }

    pub fn record(&mut self, x: f32, z: f32) {
        self.last_position = Some((x, z));
        self.updates += 1;
    }

    pub fn last_position(&self) -> Option<(f32, f32)> {
        self.last_position
    }

    /// Number of position updates received
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Marker position in `[0, 1]²`, or `None` if nothing was reported yet or
    /// the player is off the map
    pub fn marker(&self) -> Option<(f32, f32)> {
        let (x, z) = self.last_position?;
        let u = inverse_lerp(self.bounds.min_x..=self.bounds.max_x, x)?;
        let v = inverse_lerp(self.bounds.min_z..=self.bounds.max_z, z)?;
        Some((u, v))
    }

    /// Listen for `position_changed` on `bus`
    pub fn connect(self, bus: &EventBus) -> (Rc<RefCell<Self>>, Subscription) {
        let tracker = Rc::new(RefCell::new(self));
        let listener = Rc::clone(&tracker);
        let subscription = bus.subscribe(POSITION_CHANGED, move |event| {
            if let GameEvent::PositionChanged { x, z } = event {
                listener.borrow_mut().record(*x, *z);
            }
        });
        (tracker, subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_projection() {
        let mut tracker = MapTracker::new(MapBounds::default());
        assert_eq!(tracker.marker(), None);

        tracker.record(0.0, 25.0);
        assert_eq!(tracker.marker(), Some((0.5, 0.75)));

        tracker.record(-50.0, -50.0);
        assert_eq!(tracker.marker(), Some((0.0, 0.0)));
        assert_eq!(tracker.updates(), 2);
    }

    #[test]
    fn test_off_map_has_no_marker() {
        let mut tracker = MapTracker::new(MapBounds::default());
        tracker.record(75.0, 0.0);
        assert_eq!(tracker.marker(), None);
        assert_eq!(tracker.last_position(), Some((75.0, 0.0)));
    }

    #[test]
    fn test_follows_bus_events() {
        let bus = EventBus::new();
        let (tracker, _subscription) = MapTracker::new(MapBounds::default()).connect(&bus);

        bus.publish(&GameEvent::PositionChanged { x: 10.0, z: -10.0 });
        bus.publish(&GameEvent::signal(POSITION_CHANGED, true));

        assert_eq!(tracker.borrow().last_position(), Some((10.0, -10.0)));
        assert_eq!(tracker.borrow().updates(), 1);
    }
}
