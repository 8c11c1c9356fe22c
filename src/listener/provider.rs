use std::collections::BTreeMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use log::trace;

use crate::container::Container;
use crate::container::ContainerError;
use crate::container::Service;
use crate::event::Event;
use crate::listener::definition::InvocationTarget;
use crate::listener::definition::ListenerDefinition;
use crate::listener::definition::ListenerDescriptor;
use crate::listener::error::ListenerError;

/// Registry of listener definitions keyed by event type identifier.
///
/// Listeners are registered during bootstrap with
/// [`add_listener`](Self::add_listener) and looked up per dispatch with
/// [`listeners_for_event`](Self::listeners_for_event). Services are only
/// resolved through the container while the returned iterator is advanced.
pub struct ListenerProvider {
    container: Arc<dyn Container>,
    listeners: HashMap<String, Vec<ListenerDefinition>>,
}

impl ListenerProvider {
    pub fn new(container: Arc<dyn Container>) -> Self {
        Self {
            container,
            listeners: HashMap::new(),
        }
    }

    /// Appends a listener for `event_type`.
    ///
    /// Neither `service` nor `method` is validated here; problems surface when
    /// the listener is resolved or called.
    pub fn add_listener(&mut self, event_type: &str, service: &str, method: Option<&str>) {
        debug!(
            "Adding listener {service}{} for {event_type}",
            method.map(|m| format!("::{m}")).unwrap_or_default()
        );
        self.listeners
            .entry(event_type.to_string())
            .or_default()
            .push(ListenerDefinition::new(event_type, service, method));
    }

    /// Every registered definition as plain data, without touching the container.
    pub fn get_all_listener_definitions(&self) -> BTreeMap<String, Vec<ListenerDescriptor>> {
        self.listeners
            .iter()
            .map(|(event_type, definitions)| {
                let descriptors = definitions.iter().map(ListenerDefinition::descriptor);
                (event_type.clone(), descriptors.collect())
            })
            .collect()
    }

    /// Definitions registered directly under `event_type`, in insertion order.
    pub fn definitions_for(&self, event_type: &str) -> &[ListenerDefinition] {
        self.listeners
            .get(event_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Lazily resolves the listeners applicable to `event`.
    ///
    /// Order: listeners of the exact event type, then of each ancestor type
    /// nearest first, then of each capability set, each group in insertion
    /// order. Each call walks the registry again.
    pub fn listeners_for_event(&self, event: &dyn Event) -> Listeners<'_> {
        let event_type = event.event_type();
        let matched: Vec<&ListenerDefinition> = event_type
            .lineage()
            .into_iter()
            .flat_map(|name| self.definitions_for(name))
            .collect();

        trace!(
            "Matched {} listener(s) for event {event_type}",
            matched.len()
        );

        Listeners {
            container: self.container.as_ref(),
            matched: matched.into_iter(),
        }
    }
}

/// Iterator returned by [`ListenerProvider::listeners_for_event`].
///
/// Each call to `next` resolves one listener service through the container.
/// Resolution errors are yielded unchanged.
pub struct Listeners<'a> {
    container: &'a dyn Container,
    matched: std::vec::IntoIter<&'a ListenerDefinition>,
}

impl<'a> Iterator for Listeners<'a> {
    type Item = Result<ListenerInvocable<'a>, ContainerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let definition = self.matched.next()?;
        trace!("Resolving listener service \"{}\"", definition.service);
        Some(
            self.container
                .get(&definition.service)
                .map(|service| ListenerInvocable {
                    definition,
                    service,
                }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.matched.size_hint()
    }
}

impl ExactSizeIterator for Listeners<'_> {}

/// A resolved listener, ready to be called with the event.
pub struct ListenerInvocable<'a> {
    definition: &'a ListenerDefinition,
    service: Arc<dyn Service>,
}

impl ListenerInvocable<'_> {
    pub fn definition(&self) -> &ListenerDefinition {
        self.definition
    }

    /// Calls the listener with `event`.
    ///
    /// Fails with [`ListenerError::NotCallable`] when the service lacks the
    /// requested entry point; errors raised by the listener itself are
    /// returned as [`ListenerError::Failed`].
    pub fn call(&self, event: &mut dyn Event) -> Result<(), ListenerError> {
        let outcome = match &self.definition.target {
            InvocationTarget::DirectCall => self.service.invoke(event),
            InvocationTarget::Method(method) => self.service.call_method(method, event),
        };

        match outcome {
            Some(result) => result.map_err(ListenerError::Failed),
            None => Err(ListenerError::NotCallable {
                service: self.definition.service.clone(),
                method: self.definition.target.method().map(str::to_string),
            }),
        }
    }
}

impl fmt::Debug for ListenerInvocable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerInvocable")
            .field("definition", self.definition)
            .finish_non_exhaustive()
    }
}
