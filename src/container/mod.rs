//! Service container used to resolve listener services lazily.

use std::sync::Arc;

use crate::event::Event;

pub mod error;
pub mod service_container;

pub use error::ContainerError;
pub use service_container::ServiceContainer;

/// Looks up live services by identifier.
///
/// Implementations decide how services are built and whether they are shared.
/// Callers never catch resolution errors on behalf of the caller of
/// [`get`](Self::get).
#[cfg_attr(test, mockall::automock)]
pub trait Container: Send + Sync {
    /// Returns the service registered under `id`.
    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError>;

    /// Whether `id` can be resolved.
    fn has(&self, id: &str) -> bool;
}

/// A live object handed out by a [`Container`] that can act as an event listener.
///
/// A service is either directly invokable, or exposes named handler methods,
/// or both. Both entry points return `None` when the capability is missing, so
/// the caller can report a non-callable listener instead of a listener failure.
pub trait Service: Send + Sync {
    /// Handles `event` with the service itself as the listener.
    fn invoke(&self, _event: &mut dyn Event) -> Option<anyhow::Result<()>> {
        None
    }

    /// Handles `event` with the handler method called `method`.
    fn call_method(&self, _method: &str, _event: &mut dyn Event) -> Option<anyhow::Result<()>> {
        None
    }
}

impl<F> Service for F
where
    F: Fn(&mut dyn Event) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn invoke(&self, event: &mut dyn Event) -> Option<anyhow::Result<()>> {
        Some(self(event))
    }
}

/// Wraps a closure as a directly invokable service.
pub fn service_fn<F>(listener: F) -> Arc<dyn Service>
where
    F: Fn(&mut dyn Event) -> anyhow::Result<()> + Send + Sync + 'static,
{
    Arc::new(listener)
}
