use crate::dispatcher::DispatchError;
use crate::dispatcher::EventDispatcher;
use crate::event::Event;

/// Dispatcher that ignores every event.
///
/// Useful where a component requires a dispatcher but no listeners should run,
/// e.g. in tests or during early bootstrap.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEventDispatcher;

impl EventDispatcher for NoopEventDispatcher {
    fn dispatch(&self, _event: &mut dyn Event) -> Result<(), DispatchError> {
        Ok(())
    }
}
