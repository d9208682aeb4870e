//! Scoped input listeners
//!
//! The host loop dispatches every [`InputEvent`] to the hub. Each controller
//! holds a [`Subscription`] that queues the event kinds it asked for and
//! drains them once per frame. Dropping the subscription deregisters it, so
//! unmounting a controller can never leave a listener behind.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};

use crate::InputEvent;

new_key_type! {
    /// Key to a registered listener
    struct ListenerKey;
}

bitflags! {
    /// Event kinds a subscription receives
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct EventKinds: u8 {
        const POINTER_MOVE = 1 << 0;
        const WHEEL = 1 << 1;
    }
}

impl InputEvent {
    /// Kind flag of this event
    pub fn kind(&self) -> EventKinds {
        match self {
            InputEvent::PointerMoved { .. } => EventKinds::POINTER_MOVE,
            InputEvent::Wheel { .. } => EventKinds::WHEEL,
        }
    }
}

/// Queued events beyond this are dropped oldest-first
const MAX_QUEUED_EVENTS: usize = 256;

struct Listener {
    kinds: EventKinds,
    queue: VecDeque<InputEvent>,
}

type Listeners = SlotMap<ListenerKey, Listener>;

/// Fan-out point for input events
#[derive(Clone, Default)]
pub struct InputHub {
    listeners: Rc<RefCell<Listeners>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for `kinds`; it lives as long as the returned guard
    pub fn subscribe(&self, kinds: EventKinds) -> Subscription {
        let key = self.listeners.borrow_mut().insert(Listener {
            kinds,
            queue: VecDeque::new(),
        });
        log::debug!("Input listener registered for {:?}", kinds);
        Subscription {
            key,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Queue `event` for every interested listener, returning how many got it
    pub fn dispatch(&self, event: InputEvent) -> usize {
        let kind = event.kind();
        let mut delivered = 0;
        for listener in self.listeners.borrow_mut().values_mut() {
            if listener.kinds.contains(kind) {
                if listener.queue.len() >= MAX_QUEUED_EVENTS {
                    listener.queue.pop_front();
                }
                listener.queue.push_back(event);
                delivered += 1;
            }
        }
        delivered
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Registration guard returned by [`InputHub::subscribe`]
pub struct Subscription {
    key: ListenerKey,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Take all queued events, oldest first
    pub fn drain(&self) -> Vec<InputEvent> {
        let Some(listeners) = self.listeners.upgrade() else {
            return Vec::new();
        };
        let mut listeners = listeners.borrow_mut();
        match listeners.get_mut(self.key) {
            Some(listener) => listener.queue.drain(..).collect(),
            None => Vec::new(),
        }
    }

    /// Whether the hub this subscription belongs to is still alive
    pub fn is_active(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => {
                let active = listeners.borrow().contains_key(self.key);
                active
            }
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.borrow_mut().remove(self.key);
            log::debug!("Input listener released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(delta_y: f32) -> InputEvent {
        InputEvent::Wheel { delta_y }
    }

    #[test]
    fn test_drop_deregisters() {
        let hub = InputHub::new();
        {
            let _sub = hub.subscribe(EventKinds::WHEEL);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(wheel(1.0)), 0);
    }

    #[test]
    fn test_filters_by_kind() {
        let hub = InputHub::new();
        let wheel_sub = hub.subscribe(EventKinds::WHEEL);
        let pointer_sub = hub.subscribe(EventKinds::POINTER_MOVE);

        hub.dispatch(wheel(3.0));
        assert_eq!(wheel_sub.drain(), vec![wheel(3.0)]);
        assert!(pointer_sub.drain().is_empty());
    }

    #[test]
    fn test_drain_empties_queue_in_order() {
        let hub = InputHub::new();
        let sub = hub.subscribe(EventKinds::all());
        hub.dispatch(wheel(1.0));
        hub.dispatch(wheel(2.0));
        assert_eq!(sub.drain(), vec![wheel(1.0), wheel(2.0)]);
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_queue_is_bounded() {
        let hub = InputHub::new();
        let sub = hub.subscribe(EventKinds::WHEEL);
        for i in 0..(MAX_QUEUED_EVENTS + 10) {
            hub.dispatch(wheel(i as f32));
        }
        let events = sub.drain();
        assert_eq!(events.len(), MAX_QUEUED_EVENTS);
        assert_eq!(events[0], wheel(10.0));
    }

    #[test]
    fn test_subscription_outlives_hub() {
        let hub = InputHub::new();
        let sub = hub.subscribe(EventKinds::WHEEL);
        drop(hub);
        assert!(!sub.is_active());
        assert!(sub.drain().is_empty());
    }

    #[test]
    fn test_repeated_mount_cycles_do_not_leak() {
        let hub = InputHub::new();
        for _ in 0..10 {
            let _sub = hub.subscribe(EventKinds::POINTER_MOVE);
        }
        assert_eq!(hub.listener_count(), 0);
    }
}
