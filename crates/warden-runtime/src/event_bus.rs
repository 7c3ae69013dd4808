//! Event bus for broadcasting game events
//!
//! The bus is a cheaply clonable handle: every entity that needs it receives a
//! clone at construction. Delivery is synchronous, in subscription order.

use crate::event::GameEvent;
use std::cell::RefCell;
use std::rc::Rc;

type Listener = Rc<RefCell<dyn FnMut(&GameEvent)>>;

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

struct Registration {
    id: u64,
    channel: String,
    listener: Listener,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    registrations: Vec<Registration>,
}

/// Channel-keyed publish/subscribe dispatcher
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<BusInner>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for every event published on `channel`
    pub fn subscribe<F>(&self, channel: impl Into<String>, listener: F) -> Subscription
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.registrations.push(Registration {
            id,
            channel: channel.into(),
            listener: Rc::new(RefCell::new(listener)),
        });
        Subscription(id)
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.registrations.len();
        inner.registrations.retain(|r| r.id != subscription.0);
        inner.registrations.len() != before
    }

    /// Deliver an event to the listeners currently registered on its channel.
    ///
    /// Returns the number of listeners that received it. Listeners may publish
    /// from inside their callback; a listener is never re-entered while running.
    pub fn publish(&self, event: &GameEvent) -> usize {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.channel == event.channel())
            .map(|r| Rc::clone(&r.listener))
            .collect();

        let mut delivered = 0;
        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut callback) => {
                    (&mut *callback)(event);
                    delivered += 1;
                }
                Err(_) => {
                    tracing::warn!(
                        channel = event.channel(),
                        "Skipped re-entrant delivery to a running listener"
                    );
                }
            }
        }
        delivered
    }

    /// Number of listeners registered on a channel
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.inner
            .borrow()
            .registrations
            .iter()
            .filter(|r| r.channel == channel)
            .count()
    }

    /// Check if any listener is registered at all
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().registrations.is_empty()
    }

    /// Total number of registered listeners
    pub fn len(&self) -> usize {
        self.inner.borrow().registrations.len()
    }
}
