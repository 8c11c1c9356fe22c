//! Events that can be dispatched to registered listeners.

use std::any::Any;

pub mod event_type;

pub use event_type::Capability;
pub use event_type::EventType;

/// Trait for values that can be dispatched through an
/// [`EventDispatcher`](crate::dispatcher::EventDispatcher).
///
/// An event reports a static [`EventType`] describing its type name, its
/// ancestor types and the capability sets it satisfies. Listener lookup is
/// driven entirely by that descriptor. The [`impl_event!`](crate::impl_event)
/// macro implements this trait for the common cases.
pub trait Event: Any + Send + Sync + 'static {
    /// Static descriptor of this event's type.
    fn event_type(&self) -> &'static EventType;

    /// Upcast used for downcasting to the concrete event type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable counterpart of [`as_any`](Self::as_any).
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The embedded event of the parent type, if this event extends one.
    ///
    /// Must be consistent with `event_type().parent` so that listeners
    /// registered on an ancestor type can reach the ancestor's data.
    fn parent_event_mut(&mut self) -> Option<&mut dyn Event> {
        None
    }

    /// Immutable counterpart of [`parent_event_mut`](Self::parent_event_mut).
    fn parent_event(&self) -> Option<&dyn Event> {
        None
    }

    /// Returns the stop flag holder if this event supports stopping propagation.
    fn as_stoppable(&self) -> Option<&dyn StoppableEvent> {
        None
    }
}

impl dyn Event {
    /// Returns `true` if the event or one of its embedded parents is a `T`.
    pub fn is<T: Event>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Downcasts to `T`, falling back to the embedded parent events.
    pub fn downcast_ref<T: Event>(&self) -> Option<&T> {
        if let Some(event) = self.as_any().downcast_ref::<T>() {
            return Some(event);
        }
        self.parent_event()?.downcast_ref::<T>()
    }

    /// Downcasts to `T`, falling back to the embedded parent events.
    pub fn downcast_mut<T: Event>(&mut self) -> Option<&mut T> {
        if self.as_any().is::<T>() {
            return self.as_any_mut().downcast_mut::<T>();
        }
        self.parent_event_mut()?.downcast_mut::<T>()
    }

    /// Whether a stoppable event has had its propagation stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.as_stoppable()
            .is_some_and(|stoppable| stoppable.is_propagation_stopped())
    }
}

/// An event whose processing can be cut short by a listener.
///
/// Once `is_propagation_stopped` returns `true`, no further listener is called.
pub trait StoppableEvent {
    fn is_propagation_stopped(&self) -> bool;
}
