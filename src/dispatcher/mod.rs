//! Event dispatchers calling the listeners of a [`ListenerProvider`].

use std::sync::Arc;

use crate::container::ContainerError;
use crate::event::Event;
use crate::listener::ListenerError;
use crate::listener::ListenerProvider;

pub mod noop;

pub use noop::NoopEventDispatcher;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    #[error(transparent)]
    Resolution(#[from] ContainerError),

    #[error(transparent)]
    Listener(#[from] ListenerError),
}

impl DispatchError {
    /// Numeric code of the underlying error, if it carries one.
    pub fn code(&self) -> Option<u32> {
        match self {
            Self::Listener(e) => e.code(),
            Self::Resolution(_) => None,
        }
    }
}

/// Hands events to their listeners.
pub trait EventDispatcher: Send + Sync {
    /// Calls every applicable listener with `event`, in provider order.
    ///
    /// The first failing listener aborts the dispatch and its error is returned.
    fn dispatch(&self, event: &mut dyn Event) -> Result<(), DispatchError>;
}

/// Extension for dispatching owned events.
pub trait EventDispatcherExt: EventDispatcher {
    /// Dispatches `event` and hands it back, possibly modified by listeners.
    fn dispatch_event<E: Event>(&self, mut event: E) -> Result<E, DispatchError> {
        self.dispatch(&mut event)?;
        Ok(event)
    }
}

impl<D: EventDispatcher + ?Sized> EventDispatcherExt for D {}

/// Dispatcher backed by a [`ListenerProvider`].
///
/// Stoppable events that are already stopped are returned untouched, and
/// dispatch ends right after the listener that stops propagation.
pub struct Dispatcher {
    provider: Arc<ListenerProvider>,
}

impl Dispatcher {
    pub fn new(provider: Arc<ListenerProvider>) -> Self {
        Self { provider }
    }
}

impl EventDispatcher for Dispatcher {
    #[tracing::instrument(level = "debug", skip_all, fields(event = %event.event_type()))]
    fn dispatch(&self, event: &mut dyn Event) -> Result<(), DispatchError> {
        if event.is_propagation_stopped() {
            return Ok(());
        }

        for listener in self.provider.listeners_for_event(event) {
            listener?.call(event)?;
            if event.is_propagation_stopped() {
                log::debug!("Propagation of {} stopped", event.event_type());
                break;
            }
        }

        Ok(())
    }
}
